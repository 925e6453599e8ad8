//! Rules engine for the 2048 sliding tile puzzle.
//!
//! Every operation takes a grid by reference and returns a new one. The
//! only randomness is tile spawning, which goes through [`TileSource`] so
//! games can be replayed from a seed or a fixed script.

pub mod engine;
pub mod error;
pub mod game;
pub mod grid;
pub mod orient;
pub mod slide;
pub mod source;

pub use engine::{apply_move, is_game_over, legal_moves, new_game, spawn_tile, MoveOutcome};
pub use error::GameError;
pub use game::{GameState, Turn};
pub use grid::{Direction, Grid, Position, Tile, DEFAULT_SIZE, MAX_TILE, MIN_SIZE};
pub use orient::{orient, Orientation};
pub use slide::{slide_row, Score};
pub use source::{RngSource, ScriptedSource, TileSource, FOUR_PROBABILITY};
