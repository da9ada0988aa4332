//! Randomness sources for unit tests.

use rand::rngs::StdRng;
use rand::{CryptoRng, RngCore, SeedableRng};

/// Deterministic source so draws can be replayed
pub(crate) fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Entropy source that is always unavailable
pub(crate) struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source closed"))
    }
}

impl CryptoRng for FailingRng {}
