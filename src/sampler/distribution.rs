//! Sampling Distributions for Literals
//!
//! # Policy
//!
//! | Literal          | Distribution                                   |
//! |------------------|------------------------------------------------|
//! | `v`              | constant `v`                                   |
//! | `a,a`            | constant `a`                                   |
//! | `a,b`, `a > 0`   | log-normal, `[a, b]` = 0.5th..99.5th percentile |
//! | `a,b`, `a <= 0`  | normal truncated to `[a, b]`                   |
//!
//! # Parameters
//!
//! For the log-normal branch the bounds are mapped in log space:
//! ```text
//! μ = (ln a + ln b) / 2
//! σ = (ln b − ln a) / (2 · 2.576)
//! ```
//! For the truncated-normal branch directly:
//! ```text
//! μ = (a + b) / 2
//! σ = (b − a) / (2 · 2.576)
//! ```
//! 2.576 is the two-sided 99% z-score, so the lower bound sits at the 0.5th
//! and the upper bound at the 99.5th percentile of the untruncated normal.
//!
//! # Truncated Normal Draws
//!
//! Inverse-CDF sampling keeps every draw inside the bounds without
//! rejection:
//! ```text
//! U ~ Uniform(Φ(α), Φ(β)),   α = (a − μ)/σ,  β = (b − μ)/σ
//! X = μ + σ · Φ⁻¹(U)
//! ```

use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, LogNormal, Uniform};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{FermiError, FermiResult};
use crate::extract::LiteralSpec;

/// z-score of the two-sided 99% interval of the standard normal
pub const Z_99: f64 = 2.576;

/// How the draws for one placeholder are produced
#[derive(Debug, Clone)]
pub enum SamplingPlan {
    /// Every draw equals the value
    Constant(f64),

    /// Log-normal with log-space mean `mu` and deviation `sigma`
    LogNormal {
        mu: f64,
        sigma: f64,
        dist: LogNormal<f64>,
    },

    /// Normal(`mu`, `sigma`) restricted to `[low, high]`
    TruncatedNormal {
        mu: f64,
        sigma: f64,
        low: f64,
        high: f64,
        standard: Normal,
        quantiles: Uniform<f64>,
    },
}

impl SamplingPlan {
    /// Choose the distribution for `literal`.
    ///
    /// `variable` is the placeholder name, used only in error messages.
    ///
    /// # Errors
    ///
    /// [`FermiError::InvalidDistribution`] if a non-degenerate range yields
    /// a spread that is not strictly positive and finite.
    pub fn for_literal(variable: &str, literal: &LiteralSpec) -> FermiResult<Self> {
        match *literal {
            LiteralSpec::Scalar(v) => Ok(SamplingPlan::Constant(v)),
            LiteralSpec::Range { low, high } if low == high => Ok(SamplingPlan::Constant(low)),
            LiteralSpec::Range { low, high } if low > 0.0 => Self::log_normal(variable, low, high),
            LiteralSpec::Range { low, high } => Self::truncated_normal(variable, low, high),
        }
    }

    fn log_normal(variable: &str, low: f64, high: f64) -> FermiResult<Self> {
        let invalid = || invalid_distribution(variable, "log-normal");

        let (ln_low, ln_high) = (low.ln(), high.ln());
        let mu = (ln_low + ln_high) / 2.0;
        let sigma = (ln_high - ln_low) / (2.0 * Z_99);
        if !spread_is_usable(mu, sigma) {
            return Err(invalid());
        }

        let dist = LogNormal::new(mu, sigma).map_err(|_| invalid())?;
        Ok(SamplingPlan::LogNormal { mu, sigma, dist })
    }

    fn truncated_normal(variable: &str, low: f64, high: f64) -> FermiResult<Self> {
        let invalid = || invalid_distribution(variable, "normal");

        let mu = (low + high) / 2.0;
        let sigma = (high - low) / (2.0 * Z_99);
        if !spread_is_usable(mu, sigma) {
            return Err(invalid());
        }

        let standard = Normal::new(0.0, 1.0).map_err(|_| invalid())?;
        let lower_q = standard.cdf((low - mu) / sigma);
        let upper_q = standard.cdf((high - mu) / sigma);
        if !(lower_q < upper_q) {
            return Err(invalid());
        }

        Ok(SamplingPlan::TruncatedNormal {
            mu,
            sigma,
            low,
            high,
            standard,
            quantiles: Uniform::new(lower_q, upper_q),
        })
    }

    /// Draw `n` independent samples.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Array1<f64> {
        match self {
            SamplingPlan::Constant(v) => Array1::from_elem(n, *v),
            SamplingPlan::LogNormal { dist, .. } => Array1::from_shape_fn(n, |_| dist.sample(rng)),
            SamplingPlan::TruncatedNormal {
                mu,
                sigma,
                low,
                high,
                standard,
                quantiles,
            } => Array1::from_shape_fn(n, |_| {
                let u = quantiles.sample(rng);
                // Clamp absorbs rounding in Φ⁻¹ near the bounds
                (mu + sigma * standard.inverse_cdf(u)).clamp(*low, *high)
            }),
        }
    }

    /// Short name for log messages
    pub fn kind(&self) -> &'static str {
        match self {
            SamplingPlan::Constant(_) => "constant",
            SamplingPlan::LogNormal { .. } => "log-normal",
            SamplingPlan::TruncatedNormal { .. } => "truncated-normal",
        }
    }
}

fn spread_is_usable(mu: f64, sigma: f64) -> bool {
    mu.is_finite() && sigma.is_finite() && sigma > 0.0
}

fn invalid_distribution(variable: &str, distribution: &str) -> FermiError {
    FermiError::InvalidDistribution {
        variable: variable.to_string(),
        distribution: distribution.to_string(),
    }
}
