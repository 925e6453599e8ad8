use crate::grid::{Direction, Grid};

/// Layout change that turns a move in some direction into "slide left".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Identity,
    Reversed,
    Transposed,
    TransposedReversed,
}

impl Orientation {
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Left => Orientation::Identity,
            Direction::Right => Orientation::Reversed,
            Direction::Up => Orientation::Transposed,
            Direction::Down => Orientation::TransposedReversed,
        }
    }

    pub fn apply(self, grid: &Grid) -> Grid {
        match self {
            Orientation::Identity => grid.clone(),
            Orientation::Reversed => grid.reverse_rows(),
            Orientation::Transposed => grid.transpose(),
            Orientation::TransposedReversed => grid.transpose().reverse_rows(),
        }
    }

    /// Undoes `apply`.
    pub fn restore(self, grid: &Grid) -> Grid {
        match self {
            Orientation::Identity => grid.clone(),
            Orientation::Reversed => grid.reverse_rows(),
            Orientation::Transposed => grid.transpose(),
            Orientation::TransposedReversed => grid.reverse_rows().transpose(),
        }
    }
}

/// Returns the grid laid out so `direction` becomes a left slide, plus the
/// orientation needed to put it back.
pub fn orient(grid: &Grid, direction: Direction) -> (Grid, Orientation) {
    let orientation = Orientation::for_direction(direction);

    (orientation.apply(grid), orientation)
}
