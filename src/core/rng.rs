use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of all conversational randomness — reply variety, game selection,
/// number rolls, and bot moves. One instance per session; seedable so tests
/// replay identical conversations.
#[derive(Debug)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// OS-entropy source for normal operation.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Fixed-seed source; identical seeds yield identical draw sequences.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }

    /// Uniform integer in `[low, high]`, both inclusive.
    pub fn roll(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..=high)
    }

    /// True with probability `p` (must be within `[0, 1]`).
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}
