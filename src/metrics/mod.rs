//! Clustering agreement metrics.
//!
//! Both metrics compare two hard label assignments of the same samples, typically a
//! predicted clustering against ground truth. They only look at which samples share
//! a label, never at the label values themselves, so any `Eq + Hash` label type works
//! and renaming clusters never changes a score.
//!
//! | Metric | Range | Chance level | Identical partitions |
//! |--------|-------|--------------|----------------------|
//! | NMI    | [0, 1] | > 0 for many small clusters | 1 |
//! | ARI    | [-0.5, 1] | ~0 | 1 |
//!
//! NMI is information-theoretic and tends to reward over-segmentation slightly;
//! ARI is pair-counting and chance-adjusted.
//!
//! ## Usage
//!
//! ```rust
//! use shiftscore::metrics::{get_ari, get_nmi};
//!
//! let gt = ["cat", "cat", "dog", "dog"];
//! let pred = ["b", "b", "a", "a"];
//!
//! assert!((get_nmi(&pred, &gt).unwrap() - 1.0).abs() < 1e-12);
//! assert_eq!(get_ari(&pred, &gt).unwrap(), 1.0);
//! ```

mod ari;
mod contingency;
mod nmi;

pub use ari::{adjusted_rand_score, get_ari, pair_confusion_matrix};
pub use contingency::Contingency;
pub use nmi::{get_nmi, mutual_info_score, normalized_mutual_info_score, AverageMethod};
