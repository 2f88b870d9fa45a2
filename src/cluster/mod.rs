//! Parameter estimation for clustering algorithms.
//!
//! ## Mean-shift bandwidth
//!
//! Mean-shift is a mode-seeking algorithm: every point climbs the kernel density
//! estimate until it reaches a local maximum, and points sharing a maximum form a
//! cluster. The only real parameter is the kernel bandwidth, which sets the
//! neighborhood size and therefore the number of modes found.
//!
//! [`BandwidthEstimator`] picks a bandwidth from the data itself: the mean distance
//! from each point to its k-th nearest neighbor, where k is a quantile of the sample
//! size. Sampling a fraction of the rows keeps the O(m²) neighbor search affordable.
//!
//! ## Usage
//!
//! ```rust
//! use shiftscore::cluster::BandwidthEstimator;
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let bw = BandwidthEstimator::new()
//!     .with_quantile(0.5)
//!     .with_percent(100.0)
//!     .with_seed(42)
//!     .estimate(&data)
//!     .unwrap();
//! assert!(bw > 0.0 && bw < 1.0);
//! ```

mod bandwidth;
mod util;

pub use bandwidth::{
    estimate_bandwidth_meanshift, estimate_bandwidth_meanshift_seeded, BandwidthEstimator,
    SampleSize,
};
