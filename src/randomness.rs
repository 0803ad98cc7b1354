//! Randomness sources.
//!
//! The engine treats each seed as opaque input. How a seed is produced
//! (verifiable oracle, committed beacon, local PRNG) is the source's concern.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies one random value per issuance.
pub trait RandomnessSource {
    fn next_seed(&mut self) -> u64;
}

/// Pseudo-random fallback backed by `StdRng`.
///
/// Reproducible when built with [`SeededRandomness::from_seed`].
#[derive(Debug, Clone)]
pub struct SeededRandomness {
    rng: StdRng,
}

impl SeededRandomness {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomnessSource for SeededRandomness {
    fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }
}

/// Replays a fixed list of seeds, then cycles.
#[derive(Debug, Clone)]
pub struct SequenceRandomness {
    seeds: VecDeque<u64>,
}

impl SequenceRandomness {
    pub fn new(seeds: impl IntoIterator<Item = u64>) -> Self {
        Self {
            seeds: seeds.into_iter().collect(),
        }
    }
}

impl RandomnessSource for SequenceRandomness {
    fn next_seed(&mut self) -> u64 {
        match self.seeds.pop_front() {
            Some(seed) => {
                self.seeds.push_back(seed);
                seed
            }
            None => 0,
        }
    }
}
