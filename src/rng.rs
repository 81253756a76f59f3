// src/rng.rs
//! Random Number Generation for Monte Carlo Estimation
//!
//! # Design
//!
//! Every placeholder draws from its own generator so that draws are
//! independent across placeholders and a whole run is reproducible from a
//! single base seed:
//!
//! ```text
//! stream(i) = StdRng::seed_from_u64(base_seed + i)
//! ```
//!
//! where `i` is the placeholder's position in the expression. Without an
//! explicit seed the base seed is taken from the operating system.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// RNG factory for reproducible, independent per-placeholder streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Factory with a base seed drawn from system entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Create the generator for stream `stream_id`
    pub fn create_std_rng(&self, stream_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(stream_id))
    }
}
