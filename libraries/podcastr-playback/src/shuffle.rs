//! Random episode selection for shuffle mode
//!
//! Shuffle does not reorder the queue. Each `play_next` draws a fresh
//! uniformly random index, which may repeat the current one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform index picker
#[derive(Debug, Clone)]
pub struct ShufflePicker {
    rng: StdRng,
}

impl ShufflePicker {
    /// Picker seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic picker (tests, reproducible sessions)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick an index in `[0, len)`
    ///
    /// Returns `None` for an empty range.
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        Some(self.rng.gen_range(0..len))
    }
}

impl Default for ShufflePicker {
    fn default() -> Self {
        Self::new()
    }
}
