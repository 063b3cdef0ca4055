//! Gini coefficient of a set of abundances.
//!
//! The coefficient is half the relative mean absolute difference:
//!
//! ```text
//! G = 0.5 * mean_{i,j} |x_i - x_j| / mean(x)
//! ```
//!
//! where the mean runs over all n² ordered pairs, including i = j. It is 0
//! for a perfectly even distribution and approaches 1 as a single bin
//! dominates. Values are assumed non-negative; negative input is not
//! rejected but gives a meaningless result.

/// Compute the Gini coefficient by direct pairwise differences.
///
/// O(n²) time. Bins per sample number in the tens to hundreds, so this is
/// the reference implementation; see [`gini_sorted`] for the O(n log n)
/// equivalent.
///
/// # Returns
/// - NaN for an empty slice
/// - 0.0 for a single non-zero value
pub fn gini(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let n = values.len() as f64;
    let total_abs_diff: f64 = values
        .iter()
        .map(|&xi| values.iter().map(|&xj| (xi - xj).abs()).sum::<f64>())
        .sum();
    let mad = total_abs_diff / (n * n);
    let mean = values.iter().sum::<f64>() / n;

    0.5 * (mad / mean)
}

/// Compute the Gini coefficient from sorted values in O(n log n).
///
/// Uses `G = Σ (2i - n - 1) x_(i) / (n Σ x)` over ascending order
/// statistics with 1-based `i`, which is algebraically identical to
/// [`gini`]. Results agree to within floating-point rounding.
pub fn gini_sorted(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| (2.0 * (i + 1) as f64 - n - 1.0) * x)
        .sum();
    let total: f64 = sorted.iter().sum();

    weighted / (n * total)
}

/// Small-sample bias correction: `gini * n / (n - 1)`.
///
/// No special cases: n = 1 divides by zero and yields NaN or infinity,
/// which is passed through for the caller to interpret.
#[inline]
pub fn corrected_gini(gini: f64, n: usize) -> f64 {
    let n = n as f64;
    gini * (n / (n - 1.0))
}
