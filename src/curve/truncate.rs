//! Truncation of curves once cumulative abundance reaches 1.
//!
//! Floating-point accumulation can push the running total slightly past 1,
//! and tables within the sum tolerance can overshoot by more. Everything
//! after the first record past the threshold is dropped so the curve ends
//! at (or just above) full abundance.

use crate::data::SampleCurve;
use tracing::debug;

/// Running totals above this value count as full abundance.
pub const OVERSHOOT_THRESHOLD: f64 = 0.999999;

/// Truncate a curve at the default overshoot threshold.
pub fn truncate_at_full_abundance(curve: &SampleCurve) -> SampleCurve {
    truncate_at_threshold(curve, OVERSHOOT_THRESHOLD)
}

/// Keep records up to and including the first whose cumulative abundance
/// exceeds `threshold`; drop the rest.
///
/// A curve that never exceeds the threshold is returned whole, as is one
/// that crosses it only at its last record.
pub fn truncate_at_threshold(curve: &SampleCurve, threshold: f64) -> SampleCurve {
    let keep = curve
        .records()
        .iter()
        .position(|r| r.cumulative_abundance > threshold)
        .map_or(curve.len(), |first| first + 1);

    if keep < curve.len() {
        debug!(
            sample = curve.name(),
            dropped = curve.len() - keep,
            "truncated records past full abundance"
        );
    }

    curve.truncated(keep)
}

/// Truncate every curve, preserving order.
pub fn truncate_all(curves: &[SampleCurve], threshold: f64) -> Vec<SampleCurve> {
    curves
        .iter()
        .map(|curve| truncate_at_threshold(curve, threshold))
        .collect()
}
