// src/stats.rs
//! Summary Statistics of a Result Array
//!
//! # Definitions
//!
//! For samples x₁ … xₙ:
//! ```text
//! mean    = (1/n) Σ xᵢ
//! std_dev = √((1/n) Σ (xᵢ − mean)²)      population form, ddof = 0
//! ```
//! The interval bounds are the 1st and 99th percentiles with linear
//! interpolation between order statistics x₍₀₎ ≤ … ≤ x₍ₙ₋₁₎:
//! ```text
//! h = (n − 1) · p
//! q = x₍⌊h⌋₎ + (h − ⌊h⌋) · (x₍⌊h⌋+1₎ − x₍⌊h⌋₎)
//! ```
//! The band therefore covers 98% of the samples.

use ndarray::ArrayView1;

/// Percentile used for the lower interval bound
pub const CI_LOW_PERCENTILE: f64 = 1.0;
/// Percentile used for the upper interval bound
pub const CI_HIGH_PERCENTILE: f64 = 99.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

/// Reduce a result array to its summary statistics.
///
/// A NaN anywhere in `result` makes every statistic NaN. An empty array
/// has no statistics and also yields NaN throughout.
pub fn reduce(result: ArrayView1<f64>) -> Summary {
    if result.is_empty() || result.iter().any(|x| x.is_nan()) {
        return Summary {
            mean: f64::NAN,
            std_dev: f64::NAN,
            ci_low: f64::NAN,
            ci_high: f64::NAN,
        };
    }

    let mean = result.mean().unwrap_or(f64::NAN);
    let std_dev = result.std(0.0);

    let mut sorted = result.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    Summary {
        mean,
        std_dev,
        ci_low: percentile_sorted(&sorted, CI_LOW_PERCENTILE),
        ci_high: percentile_sorted(&sorted, CI_HIGH_PERCENTILE),
    }
}

/// The `p`-th percentile (`0 ≤ p ≤ 100`) of non-empty, sorted data.
///
/// Out-of-range `p` is clamped; empty input gives NaN.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    match n {
        0 => f64::NAN,
        1 => sorted[0],
        _ => {
            let h = (n - 1) as f64 * (p / 100.0).clamp(0.0, 1.0);
            let j = h.floor() as usize;
            let g = h - h.floor();
            if j + 1 >= n {
                sorted[n - 1]
            } else {
                sorted[j] + g * (sorted[j + 1] - sorted[j])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn test_single_sample() {
        let summary = reduce(array![42.5].view());
        assert_eq!(
            summary,
            Summary {
                mean: 42.5,
                std_dev: 0.0,
                ci_low: 42.5,
                ci_high: 42.5
            }
        );
    }

    #[test]
    fn test_population_std_dev() {
        let summary = reduce(array![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].view());
        assert!((summary.mean - 5.0).abs() < 1e-12);
        // Sample (n-1) std would be ~2.138
        assert!((summary.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentiles_interpolate() {
        let data: Array1<f64> = (1..=100).map(f64::from).collect();
        let summary = reduce(data.view());
        assert!((summary.ci_low - 1.99).abs() < 1e-9);
        assert!((summary.ci_high - 99.01).abs() < 1e-9);
    }

    #[test]
    fn test_percentiles_ignore_input_order() {
        let shuffled = array![5.0, 1.0, 4.0, 2.0, 3.0];
        let sorted = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let (a, b) = (reduce(shuffled.view()), reduce(sorted.view()));
        assert_eq!((a.ci_low, a.ci_high), (b.ci_low, b.ci_high));
        assert!((a.std_dev - b.std_dev).abs() < 1e-12);
    }

    #[test]
    fn test_constant_array() {
        let summary = reduce(Array1::from_elem(10_000, 1024.0).view());
        assert_eq!(summary.mean, 1024.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.ci_low, 1024.0);
        assert_eq!(summary.ci_high, 1024.0);
    }

    #[test]
    fn test_nan_propagates() {
        let summary = reduce(array![1.0, f64::NAN, 3.0].view());
        assert!(summary.mean.is_nan());
        assert!(summary.ci_low.is_nan());
        assert!(summary.ci_high.is_nan());
    }

    #[test]
    fn test_percentile_edges() {
        let data = [1.0, 2.0, 3.0];
        assert_eq!(percentile_sorted(&data, 0.0), 1.0);
        assert_eq!(percentile_sorted(&data, 50.0), 2.0);
        assert_eq!(percentile_sorted(&data, 100.0), 3.0);
        assert!(percentile_sorted(&[], 50.0).is_nan());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn reduce_is_idempotent(data in proptest::collection::vec(-1e6f64..1e6, 1..200)) {
                let array = Array1::from(data);
                prop_assert_eq!(reduce(array.view()), reduce(array.view()));
            }

            #[test]
            fn interval_lies_within_data(data in proptest::collection::vec(-1e6f64..1e6, 1..200)) {
                let array = Array1::from(data);
                let summary = reduce(array.view());
                let min = array.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = array.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(min - 1e-6 <= summary.ci_low);
                prop_assert!(summary.ci_low <= summary.ci_high);
                prop_assert!(summary.ci_high <= max + 1e-6);
                prop_assert!(summary.std_dev >= 0.0);
            }
        }
    }
}
