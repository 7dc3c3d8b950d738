//! Deterministic random number generation.
//!
//! Choice points that the search does not intercept (ordinary play, or a
//! queue with `ChoicePolicy::Resolve`) are resolved with a `GameRng`. Clones
//! copy the generator state, so two clones fed identical instructions make
//! identical draws.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in the inclusive range `[min, max]`.
    ///
    /// Callers must ensure `min <= max`.
    pub fn gen_inclusive(&mut self, min: i64, max: i64) -> i64 {
        self.inner.gen_range(min..=max)
    }

    /// Uniform index into a collection of `len` items, `None` when empty.
    pub fn gen_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.gen_range(0..len))
        }
    }
}
