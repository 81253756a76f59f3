//! Monte Carlo Sampling of Placeholders
//!
//! Turns a [`PlaceholderTable`] into one sample array of length `n` per
//! placeholder. Placeholder `i` draws from stream `i` of the
//! [`RngFactory`], so draws are independent across placeholders and a run
//! is reproducible from its base seed.

pub mod distribution;

use std::collections::HashMap;

use log::{debug, trace};
use ndarray::Array1;

use crate::error::{validation::validate_samples, FermiError, FermiResult};
use crate::extract::PlaceholderTable;
use crate::rng::RngFactory;
pub use distribution::{SamplingPlan, Z_99};

/// Sample arrays keyed by placeholder name, all of the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: usize,
    arrays: HashMap<String, Array1<f64>>,
}

impl SampleSet {
    /// Empty set whose arrays must all hold `samples` draws
    pub fn new(samples: usize) -> Self {
        Self {
            samples,
            arrays: HashMap::new(),
        }
    }

    /// Add the array for `name`.
    ///
    /// # Errors
    ///
    /// [`FermiError::SampleLength`] if the array length differs from the
    /// set's sample count.
    pub fn insert(&mut self, name: impl Into<String>, array: Array1<f64>) -> FermiResult<()> {
        if array.len() != self.samples {
            return Err(FermiError::SampleLength {
                expected: self.samples,
                found: array.len(),
            });
        }
        self.arrays.insert(name.into(), array);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Array1<f64>> {
        self.arrays.get(name)
    }

    /// Draws per placeholder
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Number of placeholders
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

/// Draw `n` samples for every placeholder in `table`.
///
/// # Errors
///
/// - [`FermiError::InvalidConfiguration`] if `n` is zero.
/// - [`FermiError::InvalidDistribution`] for a range whose spread is not
///   usable; the error names the placeholder.
pub fn sample(table: &PlaceholderTable, n: usize, rngs: &RngFactory) -> FermiResult<SampleSet> {
    validate_samples(n)?;

    let mut set = SampleSet::new(n);
    for (index, placeholder) in table.iter().enumerate() {
        let plan = SamplingPlan::for_literal(&placeholder.name, &placeholder.literal)?;
        trace!(
            "{} ('{}'): {} {:?}",
            placeholder.name,
            placeholder.source,
            plan.kind(),
            placeholder.literal
        );

        let mut rng = rngs.create_std_rng(index as u64);
        set.insert(placeholder.name.clone(), plan.draw(&mut rng, n))?;
    }

    debug!(
        "drew {} sample(s) for {} placeholder(s) (seed {})",
        n,
        set.len(),
        rngs.base_seed()
    );
    Ok(set)
}
