use enum_map::EnumMap;
use log::{debug, trace};

use crate::error::GameError;
use crate::grid::{Direction, Grid, MAX_TILE};
use crate::orient::orient;
use crate::slide::{slide_row, Score};
use crate::source::TileSource;

/// Result of sliding a grid in one direction, before any spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub grid: Grid,
    /// Sum of the tiles created by merges.
    pub score: Score,
    pub changed: bool,
}

/// Empty `size` x `size` grid with two spawned tiles.
pub fn new_game<S>(size: usize, source: &mut S) -> Result<Grid, GameError>
where
    S: TileSource + ?Sized,
{
    let grid = Grid::empty(size)?;
    let grid = spawn_tile(&spawn_tile(&grid, source), source);

    debug!("New {}x{} game: {:?}", size, size, grid.cells());

    Ok(grid)
}

pub fn apply_move(grid: &Grid, direction: Direction) -> MoveOutcome {
    let (oriented, orientation) = orient(grid, direction);
    let size = oriented.size();

    let mut cells = Vec::with_capacity(oriented.area());
    let mut score = 0;

    for row in oriented.rows() {
        let (slid, gained) = slide_row(row);

        cells.extend(slid);
        score += gained;
    }

    let moved = orientation.restore(&Grid::from_parts(size, cells));

    if moved == *grid {
        trace!("Move {} left the grid unchanged", direction);

        return MoveOutcome {
            grid: grid.clone(),
            score: 0,
            changed: false,
        };
    }

    trace!("Move {} scored {}", direction, score);

    MoveOutcome {
        grid: moved,
        score,
        changed: true,
    }
}

/// Places a 2 or 4 on a random empty cell. A full grid comes back as is.
///
/// # Panics
///
/// If `source` picks a value other than 2 or 4.
pub fn spawn_tile<S>(grid: &Grid, source: &mut S) -> Grid
where
    S: TileSource + ?Sized,
{
    let empty = grid.empty_positions();

    if empty.is_empty() {
        trace!("No empty cell to spawn into");
        return grid.clone();
    }

    let (row, col) = empty[source.pick_cell(empty.len())];
    let value = source.pick_value();
    assert!(value == 2 || value == 4, "spawned tile {}", value);

    trace!("Spawned {} at ({}, {})", value, row, col);

    grid.with_tile((row, col), value)
}

pub fn is_game_over(grid: &Grid) -> bool {
    for (row, col, value) in grid {
        if value == 0 {
            return false;
        }

        for direction in [Direction::Right, Direction::Down] {
            if value < MAX_TILE && grid.get_neighbor(row, col, direction) == Some(value) {
                return false;
            }
        }
    }

    true
}

/// Which directions would change the grid.
pub fn legal_moves(grid: &Grid) -> EnumMap<Direction, bool> {
    EnumMap::from_fn(|direction| apply_move(grid, direction).changed)
}
