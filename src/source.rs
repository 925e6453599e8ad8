use std::collections::VecDeque;

use rand::rngs::OsRng;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::grid::Tile;

/// Chance that a spawned tile is a 4 instead of a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Randomness consumed by tile spawning.
pub trait TileSource {
    /// Index into the `count` empty cells. `count` is never zero and the
    /// result must be below it.
    fn pick_cell(&mut self, count: usize) -> usize;

    /// Value of the tile being placed, 2 or 4.
    fn pick_value(&mut self) -> Tile;
}

impl<S: TileSource + ?Sized> TileSource for &mut S {
    fn pick_cell(&mut self, count: usize) -> usize {
        (**self).pick_cell(count)
    }

    fn pick_value(&mut self) -> Tile {
        (**self).pick_value()
    }
}

/// Uniform cell choice, 90/10 split between 2 and 4.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<XorShiftRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(XorShiftRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::seeded(OsRng.gen())
    }
}

impl<R: Rng> TileSource for RngSource<R> {
    fn pick_cell(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count)
    }

    fn pick_value(&mut self) -> Tile {
        if self.rng.gen_bool(FOUR_PROBABILITY) {
            4
        } else {
            2
        }
    }
}

/// Replays fixed picks. Once a queue runs dry it falls back to the first
/// empty cell and a 2.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    cells: VecDeque<usize>,
    values: VecDeque<Tile>,
}

impl ScriptedSource {
    pub fn new<C, V>(cells: C, values: V) -> Self
    where
        C: IntoIterator<Item = usize>,
        V: IntoIterator<Item = Tile>,
    {
        Self {
            cells: cells.into_iter().collect(),
            values: values.into_iter().collect(),
        }
    }

    /// Picks left unconsumed.
    pub fn remaining(&self) -> (usize, usize) {
        (self.cells.len(), self.values.len())
    }
}

impl TileSource for ScriptedSource {
    fn pick_cell(&mut self, count: usize) -> usize {
        self.cells.pop_front().unwrap_or(0).min(count - 1)
    }

    fn pick_value(&mut self) -> Tile {
        self.values.pop_front().unwrap_or(2)
    }
}
