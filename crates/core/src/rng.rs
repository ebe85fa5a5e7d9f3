//! RNG module - seeded randomness for the simulation
//!
//! Every random decision in the game (obstacle layout, food and item cells,
//! spawn points, item rolls) goes through [`GameRng`]. A session built with
//! the same seed and fed the same ticks replays identically, which is what
//! the tests rely on.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Direction;

/// Seeded random source used by the grid, snakes and session
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: StdRng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this generator started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Roll a 1-in-`n` chance. `n <= 1` always hits.
    pub fn one_in(&mut self, n: u32) -> bool {
        n <= 1 || self.inner.gen_range(0..n) == 0
    }

    /// One of the four directions, uniformly
    pub fn direction(&mut self) -> Direction {
        Direction::ALL[self.index(Direction::ALL.len())]
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(1)
    }
}
