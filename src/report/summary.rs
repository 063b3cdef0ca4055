//! Per-sample Gini summary.

use crate::data::{GiniResult, SampleCurve, SummaryReport};
use crate::stats::{corrected_gini, gini, gini_sorted};
use tracing::warn;

/// Compute Gini statistics for one curve.
///
/// The coefficient is taken over the raw abundances of the retained
/// records, not the cumulative columns; `n` is the retained record count.
pub fn gini_result(curve: &SampleCurve) -> GiniResult {
    let abundances = curve.abundances();
    let n = abundances.len();
    let g = gini(&abundances);
    debug_assert!(
        (g.is_nan() && gini_sorted(&abundances).is_nan())
            || (g - gini_sorted(&abundances)).abs() <= 1e-9,
        "pairwise and sorted Gini disagree for sample '{}'",
        curve.name()
    );

    let result = GiniResult {
        sample: curve.name().to_string(),
        gini: g,
        corrected_gini: corrected_gini(g, n),
        n,
    };

    if result.is_degenerate() {
        warn!(
            sample = curve.name(),
            n,
            gini = result.gini,
            corrected_gini = result.corrected_gini,
            "degenerate sample; statistics are not finite"
        );
    }

    result
}

/// Build the summary report, one row per curve in the order given.
pub fn build_summary(curves: &[SampleCurve]) -> SummaryReport {
    SummaryReport::new(curves.iter().map(gini_result).collect())
}
