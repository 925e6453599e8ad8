use log::{debug, info};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::{apply_move, is_game_over, new_game, spawn_tile};
use crate::error::GameError;
use crate::grid::{Direction, Grid, Tile};
use crate::slide::Score;
use crate::source::TileSource;

/// Everything a frontend needs to draw one frame of a game.
///
/// States are values: `advance` hands back the next snapshot and never
/// exposes a half-applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "GameStateRepr")
)]
pub struct GameState {
    pub grid: Grid,
    pub score: Score,
    pub game_over: bool,
    /// Moves that changed the grid.
    pub moves: u32,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GameStateRepr {
    grid: Grid,
    score: Score,
    game_over: bool,
    moves: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<GameStateRepr> for GameState {
    type Error = GameError;

    fn try_from(repr: GameStateRepr) -> Result<Self, Self::Error> {
        if repr.game_over != is_game_over(&repr.grid) {
            return Err(GameError::GameOverMismatch(repr.game_over));
        }

        Ok(Self {
            grid: repr.grid,
            score: repr.score,
            game_over: repr.game_over,
            moves: repr.moves,
        })
    }
}

/// What a single `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub direction: Direction,
    pub gained: Score,
    pub changed: bool,
}

impl GameState {
    pub fn new<S>(size: usize, source: &mut S) -> Result<Self, GameError>
    where
        S: TileSource + ?Sized,
    {
        Ok(Self::from_grid(new_game(size, source)?))
    }

    /// Starts from an arbitrary grid with a zero score.
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            game_over: is_game_over(&grid),
            grid,
            score: 0,
            moves: 0,
        }
    }

    /// Moves, spawns if the grid changed, then rechecks for game over.
    pub fn advance<S>(&self, direction: Direction, source: &mut S) -> (Self, Turn)
    where
        S: TileSource + ?Sized,
    {
        let mut turn = Turn {
            direction,
            gained: 0,
            changed: false,
        };

        if self.game_over {
            debug!("Ignoring {} after game over", direction);
            return (self.clone(), turn);
        }

        let outcome = apply_move(&self.grid, direction);

        if !outcome.changed {
            return (self.clone(), turn);
        }

        let grid = spawn_tile(&outcome.grid, source);
        let game_over = is_game_over(&grid);

        turn.gained = outcome.score;
        turn.changed = true;

        let next = Self {
            grid,
            score: self.score + outcome.score,
            game_over,
            moves: self.moves + 1,
        };

        if game_over {
            info!(
                "Game over after {} moves with score {} (max tile {})",
                next.moves,
                next.score,
                next.max_tile()
            );
        }

        (next, turn)
    }

    /// Replays `directions` in order, stopping early on game over.
    pub fn replay<S, I>(&self, directions: I, source: &mut S) -> Self
    where
        S: TileSource + ?Sized,
        I: IntoIterator<Item = Direction>,
    {
        let mut state = self.clone();

        for direction in directions {
            if state.game_over {
                break;
            }

            state = state.advance(direction, source).0;
        }

        state
    }

    pub fn max_tile(&self) -> Tile {
        self.grid.max_tile()
    }
}
