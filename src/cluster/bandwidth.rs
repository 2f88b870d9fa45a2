//! Bandwidth estimation for mean-shift clustering.
//!
//! Mean-shift needs a kernel bandwidth: the radius within which points pull a
//! candidate mode towards their mean. Too small and every point becomes its own
//! mode; too large and everything collapses into one cluster.
//!
//! The estimate used here is the usual nearest-neighbor heuristic:
//!
//! 1. Optionally draw a random subset of `m` rows (sampling without replacement).
//! 2. Let `k = floor(m * quantile)`, clamped to at least 1.
//! 3. For every sampled point, find the distance to its k-th nearest sampled
//!    neighbor. The point itself counts as its own first neighbor (distance 0).
//! 4. Average those distances.
//!
//! ```text
//! bandwidth = (1/m) Σ_i d_k(x_i)
//! ```
//!
//! A larger `quantile` looks further out, so the estimate never shrinks as the
//! quantile grows (for a fixed sample).
//!
//! ## Complexity
//!
//! O(m² · d) time and O(m) extra space per row. Sampling is what keeps this
//! tractable on large datasets.

use super::util::{squared_euclidean, validate_points};
use crate::error::{Error, Result};
use log::{debug, info};
use rand::prelude::*;

/// How many rows to feed into the estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleSize {
    /// Use every row, no sampling.
    All,
    /// Sample exactly this many rows (capped at the dataset size).
    Count(usize),
    /// Sample `floor(N * percent / 100)` rows, with `percent` in `(0, 100]`.
    Percent(f64),
}

/// Nearest-neighbor bandwidth estimator.
#[derive(Debug, Clone)]
pub struct BandwidthEstimator {
    /// Fraction of the sample used as the neighbor rank.
    quantile: f64,
    /// Sample size policy.
    sample_size: SampleSize,
    /// Optional RNG seed for reproducible sampling.
    seed: Option<u64>,
}

impl BandwidthEstimator {
    /// Create an estimator with default parameters.
    ///
    /// Defaults: `quantile = 0.3`, all rows, no seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the neighbor quantile, in `[0, 1]`.
    pub fn with_quantile(mut self, quantile: f64) -> Self {
        self.quantile = quantile;
        self
    }

    /// Sample a fixed number of rows.
    pub fn with_n_samples(mut self, n_samples: usize) -> Self {
        self.sample_size = SampleSize::Count(n_samples);
        self
    }

    /// Sample a percentage of the rows.
    pub fn with_percent(mut self, percent: f64) -> Self {
        self.sample_size = SampleSize::Percent(percent);
        self
    }

    /// Use every row.
    pub fn with_all_samples(mut self) -> Self {
        self.sample_size = SampleSize::All;
        self
    }

    /// Set the RNG seed used for sampling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Configured quantile.
    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    /// Configured sample size policy.
    pub fn sample_size(&self) -> SampleSize {
        self.sample_size
    }

    /// Neighbor rank used on a sample of `m` rows: `floor(m * quantile)`, clamped to `[1, m]`.
    pub fn neighbor_rank(&self, m: usize) -> usize {
        ((m as f64 * self.quantile).floor() as usize).clamp(1, m.max(1))
    }

    /// Resolve the sample size policy against a dataset of `n_items` rows.
    ///
    /// Returns `None` when every row should be used without sampling.
    fn resolve_sample_count(&self, n_items: usize) -> Result<Option<usize>> {
        let requested = match self.sample_size {
            SampleSize::All => return Ok(None),
            SampleSize::Count(n) => n,
            SampleSize::Percent(p) => {
                if !(p > 0.0 && p <= 100.0) {
                    return Err(Error::InvalidParameter {
                        name: "percent",
                        message: "must be in (0, 100]",
                    });
                }
                (n_items as f64 * p / 100.0).floor() as usize
            }
        };

        if requested == 0 {
            return Err(Error::InvalidSampleCount {
                requested,
                n_items,
            });
        }
        Ok(Some(requested.min(n_items)))
    }

    /// Estimate the bandwidth for `data`.
    pub fn estimate(&self, data: &[Vec<f32>]) -> Result<f64> {
        validate_points(data)?;

        if !(0.0..=1.0).contains(&self.quantile) {
            return Err(Error::InvalidParameter {
                name: "quantile",
                message: "must be in [0, 1]",
            });
        }

        let sample = match self.resolve_sample_count(data.len())? {
            None => data.iter().map(Vec::as_slice).collect::<Vec<_>>(),
            Some(m) => {
                let mut rng: Box<dyn RngCore> = match self.seed {
                    Some(s) => Box::new(StdRng::seed_from_u64(s)),
                    None => Box::new(rand::rng()),
                };
                rand::seq::index::sample(&mut *rng, data.len(), m)
                    .into_iter()
                    .map(|i| data[i].as_slice())
                    .collect()
            }
        };

        let m = sample.len();
        let k = self.neighbor_rank(m);
        debug!("Estimating bandwidth: n={}, sampled={}, k={}", data.len(), m, k);

        Ok(mean_kth_neighbor_distance(&sample, k))
    }
}

impl Default for BandwidthEstimator {
    fn default() -> Self {
        Self {
            quantile: 0.3,
            sample_size: SampleSize::All,
            seed: None,
        }
    }
}

/// Mean distance from each point to its k-th nearest neighbor (self included).
///
/// `k` must be in `1..=points.len()`.
fn mean_kth_neighbor_distance(points: &[&[f32]], k: usize) -> f64 {
    let m = points.len();
    let mut row = vec![0.0f64; m];
    let mut total = 0.0f64;

    for p in points {
        for (slot, q) in row.iter_mut().zip(points) {
            *slot = squared_euclidean(p, q);
        }
        let (_, kth, _) = row.select_nth_unstable_by(k - 1, |a, b| a.total_cmp(b));
        total += kth.sqrt();
    }

    total / m as f64
}

/// Estimate a mean-shift bandwidth from `perc` percent of the rows of `features`.
///
/// The sample size is `floor(N * perc / 100)`. Sampling uses the thread RNG;
/// see [`estimate_bandwidth_meanshift_seeded`] for reproducible results.
///
/// ```rust
/// use shiftscore::estimate_bandwidth_meanshift;
///
/// let features = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![5.0, 5.0], vec![5.0, 6.0]];
/// let bw = estimate_bandwidth_meanshift(&features, 100.0, 0.5).unwrap();
/// assert!((bw - 1.0).abs() < 1e-6);
/// ```
pub fn estimate_bandwidth_meanshift(
    features: &[Vec<f32>],
    perc: f64,
    quantile: f64,
) -> Result<f64> {
    run_with_progress(
        BandwidthEstimator::new()
            .with_percent(perc)
            .with_quantile(quantile),
        features,
    )
}

/// Like [`estimate_bandwidth_meanshift`], with a fixed sampling seed.
pub fn estimate_bandwidth_meanshift_seeded(
    features: &[Vec<f32>],
    perc: f64,
    quantile: f64,
    seed: u64,
) -> Result<f64> {
    run_with_progress(
        BandwidthEstimator::new()
            .with_percent(perc)
            .with_quantile(quantile)
            .with_seed(seed),
        features,
    )
}

fn run_with_progress(estimator: BandwidthEstimator, features: &[Vec<f32>]) -> Result<f64> {
    info!("Start estimating bandwidth");
    let bandwidth = estimator.estimate(features)?;
    info!("End estimating bandwidth: {:.6}", bandwidth);
    Ok(bandwidth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Vec<f32>> {
        (0..n).map(|i| vec![i as f32]).collect()
    }

    fn blobs(seed: u64) -> Vec<Vec<f32>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..60)
            .map(|i| {
                let center = if i % 2 == 0 { 0.0 } else { 8.0 };
                vec![
                    center + rng.random::<f32>(),
                    center + rng.random::<f32>(),
                ]
            })
            .collect()
    }

    #[test]
    fn test_two_points_full_quantile() {
        let data = vec![vec![0.0, 0.0], vec![3.0, 4.0]];
        let bw = BandwidthEstimator::new()
            .with_quantile(1.0)
            .estimate(&data)
            .unwrap();
        assert!((bw - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_self_is_first_neighbor() {
        // k = floor(2 * 0.5) = 1 picks the point itself.
        let data = vec![vec![0.0, 0.0], vec![3.0, 4.0]];
        let bw = BandwidthEstimator::new()
            .with_quantile(0.5)
            .estimate(&data)
            .unwrap();
        assert_eq!(bw, 0.0);
    }

    #[test]
    fn test_line_quantiles() {
        let data = line(4);
        let at = |q: f64| {
            BandwidthEstimator::new()
                .with_quantile(q)
                .estimate(&data)
                .unwrap()
        };
        assert!((at(0.5) - 1.0).abs() < 1e-6);
        assert!((at(0.75) - 1.5).abs() < 1e-6);
        assert!((at(1.0) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_quantile_clamps_to_self() {
        let bw = BandwidthEstimator::new()
            .with_quantile(0.0)
            .estimate(&line(10))
            .unwrap();
        assert_eq!(bw, 0.0);
    }

    #[test]
    fn test_full_sample_matches_unsampled() {
        let data = blobs(3);
        let estimator = BandwidthEstimator::new().with_n_samples(10).with_all_samples();
        assert_eq!(estimator.sample_size(), SampleSize::All);
        assert_eq!(estimator.quantile(), 0.3);
        let all = estimator.estimate(&data).unwrap();
        let sampled = BandwidthEstimator::new()
            .with_percent(100.0)
            .with_seed(11)
            .estimate(&data)
            .unwrap();
        assert!((all - sampled).abs() < 1e-4);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let data = blobs(7);
        let a = estimate_bandwidth_meanshift_seeded(&data, 50.0, 0.5, 42).unwrap();
        let b = estimate_bandwidth_meanshift_seeded(&data, 50.0, 0.5, 42).unwrap();
        assert_eq!(a, b);
        assert!(a > 0.0);
    }

    #[test]
    fn test_monotone_in_quantile() {
        let data = blobs(1);
        let mut prev = 0.0f64;
        for step in 0..=10 {
            let q = f64::from(step) / 10.0;
            let bw = BandwidthEstimator::new()
                .with_percent(40.0)
                .with_quantile(q)
                .with_seed(5)
                .estimate(&data)
                .unwrap();
            assert!(bw >= prev, "quantile {q}: {bw} < {prev}");
            prev = bw;
        }
    }

    #[test]
    fn test_count_larger_than_dataset_is_capped() {
        let data = line(5);
        let bw = BandwidthEstimator::new()
            .with_n_samples(50)
            .with_quantile(1.0)
            .with_seed(0)
            .estimate(&data)
            .unwrap();
        // Farthest distances on 0..4: 4, 3, 2, 3, 4.
        assert!((bw - 3.2).abs() < 1e-6);
    }

    #[test]
    fn test_unseeded_percent_is_non_negative() {
        let bw = estimate_bandwidth_meanshift(&blobs(9), 25.0, 0.3).unwrap();
        assert!(bw >= 0.0 && bw.is_finite());
    }

    #[test]
    fn test_empty_input() {
        let data: Vec<Vec<f32>> = vec![];
        assert!(matches!(
            BandwidthEstimator::new().estimate(&data),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            BandwidthEstimator::new().estimate(&data),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_invalid_params() {
        let data = line(3);

        assert!(estimate_bandwidth_meanshift(&data, 0.0, 0.5).is_err());
        assert!(estimate_bandwidth_meanshift(&data, 101.0, 0.5).is_err());
        assert!(estimate_bandwidth_meanshift(&data, f64::NAN, 0.5).is_err());
        assert!(estimate_bandwidth_meanshift(&data, 50.0, 1.5).is_err());
        assert!(estimate_bandwidth_meanshift(&data, 50.0, -0.1).is_err());

        // floor(3 * 10 / 100) == 0
        assert!(matches!(
            estimate_bandwidth_meanshift(&data, 10.0, 0.5),
            Err(Error::InvalidSampleCount {
                requested: 0,
                n_items: 3
            })
        ));

        assert!(BandwidthEstimator::new()
            .with_n_samples(0)
            .estimate(&data)
            .is_err());
    }

    #[test]
    fn test_decimal_quantile_rank() {
        let estimator = BandwidthEstimator::new().with_quantile(0.7);
        assert_eq!(estimator.neighbor_rank(10), 7);

        // k = 7 on 0..9: mean over points of the 7th smallest distance.
        let bw = estimator.estimate(&line(10)).unwrap();
        assert!((bw - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_decimal_percent_sample_count() {
        let estimator = BandwidthEstimator::new().with_percent(0.7);
        assert_eq!(estimator.resolve_sample_count(1000).unwrap(), Some(7));

        let data = line(1000);
        let by_percent = estimate_bandwidth_meanshift_seeded(&data, 0.7, 1.0, 3).unwrap();
        let by_count = BandwidthEstimator::new()
            .with_n_samples(7)
            .with_quantile(1.0)
            .with_seed(3)
            .estimate(&data)
            .unwrap();
        assert_eq!(by_percent, by_count);
    }

    #[test]
    fn test_large_coordinates_stay_finite() {
        let data = vec![vec![0.0], vec![1e20]];
        let bw = BandwidthEstimator::new()
            .with_quantile(1.0)
            .estimate(&data)
            .unwrap();
        assert!(bw.is_finite());
        assert!((bw - 1e20).abs() / 1e20 < 1e-6);

        let data = vec![vec![-f32::MAX, f32::MAX], vec![f32::MAX, -f32::MAX]];
        let bw = BandwidthEstimator::new()
            .with_quantile(1.0)
            .estimate(&data)
            .unwrap();
        assert!(bw.is_finite() && bw > 0.0);
    }

    #[test]
    fn test_non_finite_input() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let data = vec![vec![0.0], vec![bad], vec![1.0]];
            assert!(matches!(
                BandwidthEstimator::new().estimate(&data),
                Err(Error::InvalidParameter { name: "data", .. })
            ));
        }
    }
}
