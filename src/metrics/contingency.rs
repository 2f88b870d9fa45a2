//! Contingency tables between two label assignments.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::hash::Hash;

/// Contingency table between two label assignments.
///
/// Rows index the distinct labels of the first assignment, columns those of the
/// second, both in first-seen order. Only non-zero cells are stored.
#[derive(Debug, Clone)]
pub struct Contingency {
    n_samples: usize,
    row_sums: Vec<u64>,
    col_sums: Vec<u64>,
    cells: HashMap<(usize, usize), u64>,
}

impl Contingency {
    /// Build the table for `a` (rows) against `b` (columns).
    pub fn new<L: Eq + Hash>(a: &[L], b: &[L]) -> Result<Self> {
        if a.len() != b.len() {
            return Err(Error::LengthMismatch {
                left: a.len(),
                right: b.len(),
            });
        }

        let rows = dense_labels(a);
        let cols = dense_labels(b);
        let n_rows = rows.iter().max().map_or(0, |&m| m + 1);
        let n_cols = cols.iter().max().map_or(0, |&m| m + 1);

        let mut row_sums = vec![0u64; n_rows];
        let mut col_sums = vec![0u64; n_cols];
        let mut cells: HashMap<(usize, usize), u64> = HashMap::new();
        for (&i, &j) in rows.iter().zip(&cols) {
            row_sums[i] += 1;
            col_sums[j] += 1;
            *cells.entry((i, j)).or_insert(0) += 1;
        }

        Ok(Self {
            n_samples: a.len(),
            row_sums,
            col_sums,
            cells,
        })
    }

    /// Number of labeled samples.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Number of distinct labels in the first assignment.
    pub fn n_rows(&self) -> usize {
        self.row_sums.len()
    }

    /// Number of distinct labels in the second assignment.
    pub fn n_cols(&self) -> usize {
        self.col_sums.len()
    }

    /// Cluster sizes of the first assignment.
    pub fn row_sums(&self) -> &[u64] {
        &self.row_sums
    }

    /// Cluster sizes of the second assignment.
    pub fn col_sums(&self) -> &[u64] {
        &self.col_sums
    }

    /// Iterate over non-zero cells as `(row, col, count)`.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        self.cells.iter().map(|(&(i, j), &c)| (i, j, c))
    }
}

/// Map arbitrary labels to `0..n_distinct` in first-seen order.
fn dense_labels<L: Eq + Hash>(labels: &[L]) -> Vec<usize> {
    let mut ids: HashMap<&L, usize> = HashMap::new();
    labels
        .iter()
        .map(|l| {
            let next = ids.len();
            *ids.entry(l).or_insert(next)
        })
        .collect()
}
