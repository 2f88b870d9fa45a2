//! Mean-shift bandwidth estimation and clustering agreement metrics.
//!
//! `shiftscore` covers the two ends of a clustering experiment on dense vectors:
//!
//! - [`cluster`]: estimate a mean-shift bandwidth from a sampled subset of rows
//! - [`metrics`]: score a predicted labeling against ground truth (NMI, ARI)
//! - [`config`]: explicit process-wide startup options
//!
//! Progress is reported through the [`log`] facade; install any logger to see it.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod config;
pub mod error;
pub mod metrics;

pub use cluster::{
    estimate_bandwidth_meanshift, estimate_bandwidth_meanshift_seeded, BandwidthEstimator,
    SampleSize,
};
pub use config::RuntimeOptions;
pub use error::{Error, Result};
pub use metrics::{get_ari, get_nmi, AverageMethod};
