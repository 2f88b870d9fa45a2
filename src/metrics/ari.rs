//! Adjusted Rand index.
//!
//! The Rand index counts sample pairs on which two labelings agree (both "same
//! cluster" or both "different cluster"). The adjusted version subtracts the
//! agreement expected by chance, so random labelings score near 0 and identical
//! partitions score 1. Values can go negative (down to -0.5) for labelings that
//! disagree more than chance would.

use super::contingency::Contingency;
use crate::error::Result;
use std::hash::Hash;

/// Pair confusion matrix `[[tn, fp], [fn, tp]]` over ordered sample pairs.
///
/// - `tp`: pairs together in both labelings
/// - `fn`: together in `labels_true`, apart in `labels_pred`
/// - `fp`: apart in `labels_true`, together in `labels_pred`
/// - `tn`: apart in both
///
/// Each unordered pair is counted twice; the diagonal (i, i) is excluded.
pub fn pair_confusion_matrix<L: Eq + Hash>(
    labels_true: &[L],
    labels_pred: &[L],
) -> Result<[[u64; 2]; 2]> {
    let table = Contingency::new(labels_true, labels_pred)?;
    Ok(pair_confusion(&table))
}

fn pair_confusion(table: &Contingency) -> [[u64; 2]; 2] {
    let n = table.n_samples() as u64;
    let rows = table.row_sums();
    let cols = table.col_sums();

    let mut sum_squares = 0u64;
    let mut weighted_by_col = 0u64;
    let mut weighted_by_row = 0u64;
    for (i, j, c) in table.nonzero() {
        sum_squares += c * c;
        weighted_by_col += c * cols[j];
        weighted_by_row += c * rows[i];
    }

    let tp = sum_squares - n;
    let fp = weighted_by_col - sum_squares;
    let fn_ = weighted_by_row - sum_squares;
    let tn = n * n - fp - fn_ - sum_squares;
    [[tn, fp], [fn_, tp]]
}

/// Adjusted Rand index between `labels_true` and `labels_pred`.
pub fn adjusted_rand_score<L: Eq + Hash>(labels_true: &[L], labels_pred: &[L]) -> Result<f64> {
    let [[tn, fp], [fn_, tp]] = pair_confusion_matrix(labels_true, labels_pred)?;

    // Identical partitions, including the all-one-cluster and all-singleton cases.
    if fn_ == 0 && fp == 0 {
        return Ok(1.0);
    }

    let (tn, fp, fn_, tp) = (
        u128::from(tn),
        u128::from(fp),
        u128::from(fn_),
        u128::from(tp),
    );
    let numerator = 2 * ((tp * tn) as i128 - (fn_ * fp) as i128);
    let denominator = (tp + fn_) * (fn_ + tn) + (tp + fp) * (fp + tn);
    Ok(numerator as f64 / denominator as f64)
}

/// ARI of a predicted labeling against ground truth.
///
/// ```rust
/// use shiftscore::get_ari;
///
/// assert_eq!(get_ari(&[0, 0, 1, 1], &[1, 1, 0, 0]).unwrap(), 1.0);
/// ```
pub fn get_ari<L: Eq + Hash>(prediction: &[L], gt: &[L]) -> Result<f64> {
    adjusted_rand_score(gt, prediction)
}
