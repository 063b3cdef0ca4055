//! Column-sum validation: every sample must be a complete relative abundance
//! distribution.

use crate::data::AbundanceTable;
use crate::error::{PlCurveError, Result};
use tracing::debug;

/// Allowed deviation of a sample's total abundance from 1.
pub const SUM_TOLERANCE: f64 = 0.0001;

/// Total abundance of each sample column, in column order.
pub fn column_sums(table: &AbundanceTable) -> Vec<f64> {
    table.col_sums()
}

/// Check whether a total lies within `[1 - tolerance, 1 + tolerance]`.
///
/// NaN totals never pass, so a column holding a missing value fails
/// validation instead of slipping through.
#[inline]
pub fn sums_to_one(total: f64, tolerance: f64) -> bool {
    (1.0 - tolerance..=1.0 + tolerance).contains(&total)
}

/// Check that every column sums to 1 within the default tolerance.
///
/// Returns `false` as soon as one column falls outside. A table without rows
/// has all-zero column sums and therefore fails.
pub fn check_columns(table: &AbundanceTable) -> bool {
    check_columns_with_tolerance(table, SUM_TOLERANCE)
}

/// Check that every column sums to 1 within `tolerance`.
pub fn check_columns_with_tolerance(table: &AbundanceTable, tolerance: f64) -> bool {
    column_sums(table)
        .into_iter()
        .all(|total| sums_to_one(total, tolerance))
}

/// Validate column sums, naming the first offending sample on failure.
///
/// # Errors
/// - [`PlCurveError::InvalidParameter`] if `tolerance` is negative or not finite
/// - [`PlCurveError::ColumnSum`] for the first column outside the tolerance
pub fn validate_columns(table: &AbundanceTable, tolerance: f64) -> Result<()> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(PlCurveError::InvalidParameter(
            "Sum tolerance must be a non-negative finite number".to_string(),
        ));
    }

    for (sample, total) in table.sample_ids().iter().zip(column_sums(table)) {
        debug!(sample = %sample, total, "column total");
        if !sums_to_one(total, tolerance) {
            return Err(PlCurveError::ColumnSum {
                sample: sample.clone(),
                total,
            });
        }
    }
    Ok(())
}
