// src/config.rs
use crate::error::{validation::validate_samples, FermiResult};
use crate::rng::RngFactory;

/// Default number of Monte Carlo samples per run
pub const DEFAULT_SAMPLES: usize = 10_000;

/// Settings for one estimation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateConfig {
    /// Draws per placeholder
    pub samples: usize,
    /// Base RNG seed; `None` seeds from system entropy
    pub seed: Option<u64>,
}

impl EstimateConfig {
    /// Validate the configuration
    pub fn validate(&self) -> FermiResult<()> {
        validate_samples(self.samples)
    }

    /// The RNG factory for this run, honouring a fixed seed if one is set
    pub fn rng_factory(&self) -> RngFactory {
        match self.seed {
            Some(seed) => RngFactory::new(seed),
            None => RngFactory::from_entropy(),
        }
    }
}

impl Default for EstimateConfig {
    fn default() -> Self {
        EstimateConfig {
            samples: DEFAULT_SAMPLES,
            seed: None,
        }
    }
}
