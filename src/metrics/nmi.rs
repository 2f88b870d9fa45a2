//! Normalized mutual information.
//!
//! The mutual information between two labelings `U` and `V` of the same `n` samples is
//!
//! ```text
//! MI(U, V) = Σ_i Σ_j (n_ij / n) · ln(n · n_ij / (a_i · b_j))
//! ```
//!
//! where `n_ij` is the contingency count and `a_i`, `b_j` are the cluster sizes.
//! NMI divides it by a mean of the two entropies `H(U)` and `H(V)`, which bounds the
//! score to `[0, 1]`: 1 for identical partitions (up to relabeling), 0 for independent
//! ones.

use super::contingency::Contingency;
use crate::error::Result;
use std::hash::Hash;

/// How to average `H(U)` and `H(V)` in the NMI denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AverageMethod {
    /// `min(H(U), H(V))`
    Min,
    /// `sqrt(H(U) · H(V))`
    Geometric,
    /// `(H(U) + H(V)) / 2`
    #[default]
    Arithmetic,
    /// `max(H(U), H(V))`
    Max,
}

impl AverageMethod {
    fn average(self, u: f64, v: f64) -> f64 {
        match self {
            Self::Min => u.min(v),
            Self::Geometric => (u * v).sqrt(),
            Self::Arithmetic => (u + v) / 2.0,
            Self::Max => u.max(v),
        }
    }
}

/// Mutual information (in nats) between two label assignments.
pub fn mutual_info_score<L: Eq + Hash>(labels_true: &[L], labels_pred: &[L]) -> Result<f64> {
    let table = Contingency::new(labels_true, labels_pred)?;
    Ok(mutual_info(&table))
}

fn mutual_info(table: &Contingency) -> f64 {
    // A single cluster on either side carries no information.
    if table.n_rows() <= 1 || table.n_cols() <= 1 {
        return 0.0;
    }

    let n = table.n_samples() as f64;
    let rows = table.row_sums();
    let cols = table.col_sums();

    let mi: f64 = table
        .nonzero()
        .map(|(i, j, c)| {
            let nij = c as f64;
            let term = nij / n * (n * nij / (rows[i] as f64 * cols[j] as f64)).ln();
            if term.abs() < f64::EPSILON {
                0.0
            } else {
                term
            }
        })
        .sum();
    mi.max(0.0)
}

fn entropy(sizes: &[u64], n: usize) -> f64 {
    let n = n as f64;
    sizes
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / n;
            -p * p.ln()
        })
        .sum()
}

/// Normalized mutual information between `labels_true` and `labels_pred`.
///
/// Identical single-cluster (or empty) assignments score 1.0 by convention.
pub fn normalized_mutual_info_score<L: Eq + Hash>(
    labels_true: &[L],
    labels_pred: &[L],
    method: AverageMethod,
) -> Result<f64> {
    let table = Contingency::new(labels_true, labels_pred)?;

    let (r, c) = (table.n_rows(), table.n_cols());
    if (r == 1 && c == 1) || (r == 0 && c == 0) {
        return Ok(1.0);
    }

    let mi = mutual_info(&table);
    if mi == 0.0 {
        return Ok(0.0);
    }

    let h_true = entropy(table.row_sums(), table.n_samples());
    let h_pred = entropy(table.col_sums(), table.n_samples());
    let normalizer = method.average(h_true, h_pred).max(f64::EPSILON);
    Ok(mi / normalizer)
}

/// NMI of a predicted labeling against ground truth, arithmetic normalization.
///
/// ```rust
/// use shiftscore::get_nmi;
///
/// let nmi = get_nmi(&[0, 0, 1, 1], &[0, 0, 1, 1]).unwrap();
/// assert!((nmi - 1.0).abs() < 1e-12);
/// ```
pub fn get_nmi<L: Eq + Hash>(prediction: &[L], gt: &[L]) -> Result<f64> {
    normalized_mutual_info_score(gt, prediction, AverageMethod::Arithmetic)
}
