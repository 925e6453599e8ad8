use crate::cli::{AppConfig, Mode};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::time::Duration;

#[cfg(feature = "threaded")]
use rayon::prelude::*;

use twenty_forty_eight::{legal_moves, Direction, GameError, GameState, RngSource, Score};

pub struct GameApp {
    config: AppConfig,
}

impl GameApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let seed = self.config.seed.unwrap_or_else(|| OsRng.gen());

        info!("Using seed: {}", seed);

        let states = match &self.config.mode {
            Mode::Replay(moves) => vec![self.replay(moves, seed)?],
            Mode::Autoplay { games } => self.autoplay(*games, seed)?,
        };

        self.report(&states)?;

        Ok(())
    }

    fn replay(&self, moves: &[Direction], seed: u64) -> Result<GameState, GameError> {
        let mut source = RngSource::seeded(seed);
        let mut state = GameState::new(self.config.size, &mut source)?;

        for (index, &direction) in moves.iter().enumerate() {
            if state.game_over {
                info!("Game ended before move {} of {}", index + 1, moves.len());
                break;
            }

            let (next, turn) = state.advance(direction, &mut source);

            debug!(
                "Move {} {}: changed={} gained={}",
                index + 1,
                direction,
                turn.changed,
                turn.gained
            );

            state = next;
        }

        Ok(state)
    }

    fn autoplay(&self, games: usize, seed: u64) -> Result<Vec<GameState>, GameError> {
        let progress = ProgressBar::new(games as u64);
        progress.enable_steady_tick(Duration::from_millis(200));
        progress.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len} {per_sec:>12}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let size = self.config.size;
        let play = |game: u64| {
            let state = play_random(size, seed.wrapping_add(game));
            progress.inc(1);
            state
        };

        #[cfg(not(feature = "threaded"))]
        let states = (0..games as u64).map(play).collect::<Result<Vec<_>, _>>();

        #[cfg(feature = "threaded")]
        let states = (0..games as u64)
            .into_par_iter()
            .map(play)
            .collect::<Result<Vec<_>, _>>();

        progress.finish_and_clear();

        states
    }

    fn report(&self, states: &[GameState]) -> Result<(), Box<dyn std::error::Error>> {
        #[cfg(feature = "serde")]
        {
            if self.config.json {
                let output = match states {
                    [state] => serde_json::to_string_pretty(state)?,
                    _ => serde_json::to_string_pretty(states)?,
                };

                println!("{}", output);
                return Ok(());
            }
        }

        if let [state] = states {
            print!("{}", state.grid);
            println!(
                "score: {}  moves: {}  max tile: {}{}",
                state.score,
                state.moves,
                state.max_tile(),
                if state.game_over { "  (game over)" } else { "" }
            );
            return Ok(());
        }

        for (game, state) in states.iter().enumerate() {
            println!(
                "game {:>4}: score {:>7}  moves {:>5}  max tile {:>5}",
                game + 1,
                state.score,
                state.moves,
                state.max_tile()
            );
        }

        let total: Score = states.iter().map(|state| state.score).sum();
        let best = states.iter().map(GameState::max_tile).max().unwrap_or(0);

        println!(
            "mean score {:.1} over {} games, best tile {}",
            total as f64 / states.len() as f64,
            states.len(),
            best
        );

        Ok(())
    }
}

/// Plays uniformly random legal moves until the game ends.
pub fn play_random(size: usize, seed: u64) -> Result<GameState, GameError> {
    let mut source = RngSource::seeded(seed);
    let mut chooser = XorShiftRng::seed_from_u64(seed.rotate_left(32));
    let mut state = GameState::new(size, &mut source)?;

    while !state.game_over {
        let legal = legal_moves(&state.grid);
        let choices: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| legal[direction])
            .collect();

        // a grid that isn't over always has a changing move
        let direction = match choices.choose(&mut chooser) {
            Some(&direction) => direction,
            None => break,
        };

        state = state.advance(direction, &mut source).0;
    }

    debug!(
        "Seed {} finished: score {} after {} moves",
        seed, state.score, state.moves
    );

    Ok(state)
}
