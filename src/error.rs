use thiserror::Error;

use crate::grid::{Tile, MAX_TILE, MIN_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("grid size must be at least {}, got {0}", MIN_SIZE)]
    InvalidSize(usize),

    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error(
        "invalid tile {value} at ({row}, {col}); tiles are 0 or a power of two from 2 to {}",
        MAX_TILE
    )]
    InvalidTile { value: Tile, row: usize, col: usize },

    #[error("stored game_over={0} disagrees with the grid")]
    GameOverMismatch(bool),
}
