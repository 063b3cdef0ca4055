//! Removal of bins that are absent from every sample.

use crate::data::AbundanceTable;
use crate::error::Result;
use tracing::info;

/// Indices of rows whose values across all samples sum to exactly zero.
pub fn zero_row_indices(table: &AbundanceTable) -> Vec<usize> {
    table
        .row_sums()
        .iter()
        .enumerate()
        .filter(|(_, total)| **total == 0.0)
        .map(|(row, _)| row)
        .collect()
}

/// Remove every bin whose abundances sum to exactly zero.
///
/// Any non-zero value, however small, keeps the row. Surviving rows keep
/// their original order. The input table is left untouched.
///
/// # Returns
/// A new AbundanceTable without the all-zero bins.
pub fn remove_zero_rows(table: &AbundanceTable) -> Result<AbundanceTable> {
    let row_sums = table.row_sums();
    let keep_indices: Vec<usize> = (0..table.n_bins())
        .filter(|&row| row_sums[row] != 0.0)
        .collect();

    let removed = table.n_bins() - keep_indices.len();
    if removed > 0 {
        info!(removed, remaining = keep_indices.len(), "removed empty bins");
    }

    table.subset_bins(&keep_indices)
}
