//! # fermi: Order-of-Magnitude Estimation by Monte Carlo
//!
//! Write an ordinary arithmetic expression, but wherever a quantity is
//! uncertain, write a range `low,high` instead of a number. fermi samples
//! every range, pushes the samples through the arithmetic and reports the
//! spread of the answer.
//!
//! ## Quick Start
//!
//! ```rust
//! use fermi::{estimate, EstimateConfig};
//!
//! // People in a city (1 to 10 million) times pianos per person
//! let config = EstimateConfig {
//!     samples: 10_000,
//!     seed: Some(42),
//! };
//! let estimate = estimate("1e6,1e7 * 0.001,0.01", &config).expect("valid expression");
//!
//! let s = estimate.summary;
//! assert!(s.ci_low <= s.mean && s.mean <= s.ci_high);
//! println!("{:.0} pianos (98% band {:.0}..{:.0})", s.mean, s.ci_low, s.ci_high);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! expression ──extract──> rewritten + placeholders
//!            ──sample───> one array of n draws per placeholder
//!            ──evaluate─> one result array of n values
//!            ──reduce───> mean, std_dev, 1st/99th percentile
//! ```
//!
//! Positive ranges are sampled log-normally, ranges touching zero or below
//! from a truncated normal; see [`sampler::distribution`].

pub mod config;
pub mod error;
pub mod eval;
pub mod extract;
pub mod output;
pub mod rng;
pub mod sampler;
pub mod stats;

use log::info;

pub use config::EstimateConfig;
pub use error::{EvalError, FermiError, FermiResult};
pub use extract::{extract, Extraction, LiteralSpec, PlaceholderTable};
pub use sampler::{sample, SampleSet};
pub use stats::{reduce, Summary};

/// Outcome of one estimation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub summary: Summary,
    /// Draws per placeholder
    pub samples: usize,
    /// Base seed of the run; pass it back as `seed` to reproduce the run
    pub seed: u64,
}

/// Run the whole pipeline on `expression`.
///
/// # Errors
///
/// Any [`FermiError`]; each stage aborts the run on its first error.
pub fn estimate(expression: &str, config: &EstimateConfig) -> FermiResult<Estimate> {
    config.validate()?;

    let extraction = extract(expression)?;
    let rngs = config.rng_factory();
    let samples = sample(&extraction.table, config.samples, &rngs)?;

    let result = eval::evaluate(&extraction.rewritten, &samples).map_err(|e| match e {
        FermiError::NotVectorized { .. } => FermiError::NotVectorized {
            expression: expression.to_string(),
        },
        other => other,
    })?;

    let summary = reduce(result.view());
    info!(
        "'{}': mean={} std_dev={} ci=[{}, {}]",
        expression, summary.mean, summary.std_dev, summary.ci_low, summary.ci_high
    );

    Ok(Estimate {
        summary,
        samples: config.samples,
        seed: rngs.base_seed(),
    })
}
