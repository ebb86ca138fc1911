//! Random index source backed by `rand`

use flashcard_domain::IndexSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform picks for `OrderingPolicy::Random`
#[derive(Debug, Clone)]
pub struct RandIndexSource {
    rng: StdRng,
}

impl RandIndexSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence, e.g. for `--seed`
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandIndexSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl IndexSource for RandIndexSource {
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}
