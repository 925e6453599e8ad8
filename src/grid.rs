use core::str::FromStr;
use std::fmt;

use enum_map::Enum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Cell value. `0` is an empty cell, anything else is a power of two.
pub type Tile = u32;

/// `(row, col)`, both zero-based.
pub type Position = (usize, usize);

pub const MIN_SIZE: usize = 2;
pub const DEFAULT_SIZE: usize = 4;

/// Largest tile a grid may hold. Two tiles at the cap never merge, so
/// doubling can't overflow `Tile`.
pub const MAX_TILE: Tile = 1 << 30;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Enum)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u" | "up" => Ok(Direction::Up),
            "d" | "down" => Ok(Direction::Down),
            "l" | "left" => Ok(Direction::Left),
            "r" | "right" => Ok(Direction::Right),
            _ => Err(format!("invalid direction: {}", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };

        f.write_str(name)
    }
}

/// Square board stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct Grid {
    size: usize,
    cells: Vec<Tile>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GridRepr {
    size: usize,
    cells: Vec<Tile>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GameError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let rows = repr
            .cells
            .chunks(repr.size.max(1))
            .map(|row| row.to_vec())
            .collect::<Vec<_>>();

        Grid::from_rows(rows)
    }
}

pub struct GridIter<'a> {
    grid: &'a Grid,
    pos: usize,
}

impl Grid {
    /// Fills a `size` x `size` grid from `initializer(row, col)`, checking the
    /// size and every tile the closure returns.
    pub fn new<F: FnMut(usize, usize) -> Tile>(
        size: usize,
        initializer: &mut F,
    ) -> Result<Self, GameError> {
        if size < MIN_SIZE {
            return Err(GameError::InvalidSize(size));
        }

        let mut cells = Vec::with_capacity(size * size);

        for row in 0..size {
            for col in 0..size {
                let value = initializer(row, col);

                if !is_valid_tile(value) {
                    return Err(GameError::InvalidTile { value, row, col });
                }

                cells.push(value);
            }
        }

        Ok(Self { size, cells })
    }

    pub fn empty(size: usize) -> Result<Self, GameError> {
        Self::new(size, &mut |_, _| 0)
    }

    /// Builds a grid from nested rows, checking shape and tile values.
    pub fn from_rows<R: AsRef<[Tile]>>(
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, GameError> {
        let rows: Vec<R> = rows.into_iter().collect();
        let size = rows.len();

        if size < MIN_SIZE {
            return Err(GameError::InvalidSize(size));
        }

        for (row, values) in rows.iter().enumerate() {
            let len = values.as_ref().len();

            if len != size {
                return Err(GameError::NotSquare {
                    row,
                    len,
                    expected: size,
                });
            }
        }

        Self::new(size, &mut |row, col| rows[row].as_ref()[col])
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Flat row-major view, the shape a renderer walks.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Tile> {
        self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.rows().map(<[Tile]>::to_vec).collect()
    }

    pub fn iter(&self) -> GridIter {
        GridIter { grid: self, pos: 0 }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        if row >= self.size || col >= self.size {
            return None;
        }

        self.cells.get(row * self.size + col).copied()
    }

    pub fn get_neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<Tile> {
        let (row, col) = match direction {
            Direction::Up => {
                if row == 0 {
                    None
                } else {
                    Some((row - 1, col))
                }
            }
            Direction::Down => {
                if row + 1 >= self.size {
                    None
                } else {
                    Some((row + 1, col))
                }
            }
            Direction::Left => {
                if col == 0 {
                    None
                } else {
                    Some((row, col - 1))
                }
            }
            Direction::Right => {
                if col + 1 >= self.size {
                    None
                } else {
                    Some((row, col + 1))
                }
            }
        }?;

        self.get(row, col)
    }

    /// Empty cells in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|&(_, _, value)| value == 0)
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&value| value != 0)
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of every tile on the board.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&value| u64::from(value)).sum()
    }

    /// Swaps rows and columns.
    pub fn transpose(&self) -> Self {
        let size = self.size;
        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .map(|(row, col)| self.cells[col * size + row])
            .collect();

        Self::from_parts(size, cells)
    }

    /// Reverses every row.
    pub fn reverse_rows(&self) -> Self {
        let size = self.size;
        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .map(|(row, col)| self.cells[row * size + (size - 1 - col)])
            .collect();

        Self::from_parts(size, cells)
    }

    pub(crate) fn with_tile(&self, (row, col): Position, value: Tile) -> Self {
        let mut cells = self.cells.clone();
        cells[row * self.size + col] = value;

        Self {
            size: self.size,
            cells,
        }
    }

    pub(crate) fn from_parts(size: usize, cells: Vec<Tile>) -> Self {
        debug_assert_eq!(cells.len(), size * size);

        Self { size, cells }
    }
}

pub(crate) fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().to_string().len();

        for row in self.rows() {
            let line = row
                .iter()
                .map(|&value| match value {
                    0 => format!("{:>width$}", ".", width = width),
                    _ => format!("{:>width$}", value, width = width),
                })
                .collect::<Vec<_>>()
                .join(" ");

            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = (usize, usize, Tile);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> Iterator for GridIter<'a> {
    type Item = (usize, usize, Tile);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.grid.cells.len() {
            None
        } else {
            let row = self.pos / self.grid.size;
            let col = self.pos % self.grid.size;
            let value = self.grid.cells[self.pos];

            self.pos += 1;

            Some((row, col, value))
        }
    }
}
