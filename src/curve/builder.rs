//! Ranking and accumulation of sample abundances.

use crate::data::{AbundanceTable, CurveRecord, Sample, SampleCurve};
use crate::error::Result;
use rayon::prelude::*;

/// Sort a sample's (bin, abundance) pairs by descending abundance.
///
/// The sort is stable: bins with exactly equal abundance keep their table
/// row order.
pub fn sort_bins(sample: &Sample) -> Vec<(String, f64)> {
    let mut pairs: Vec<(String, f64)> = sample
        .iter()
        .map(|(bin, abundance)| (bin.to_string(), abundance))
        .collect();
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
    pairs
}

/// Build the Pareto-Lorenz curve of one sample.
///
/// For rank `i` (0-based) of `n` bins:
/// - `cumulative_abundance[i] = abundance[i] + cumulative_abundance[i - 1]`
/// - `cumulative_proportion[i] = (i + 1) / n`
///
/// `n` is fixed here, so later truncation leaves the proportions unchanged.
pub fn build_curve(sample: &Sample) -> SampleCurve {
    let sorted = sort_bins(sample);
    let n = sorted.len();

    let mut running = 0.0;
    let records = sorted
        .into_iter()
        .enumerate()
        .map(|(i, (bin_id, abundance))| {
            running += abundance;
            CurveRecord {
                bin_id,
                abundance,
                cumulative_abundance: running,
                cumulative_proportion: (i + 1) as f64 / n as f64,
            }
        })
        .collect();

    SampleCurve::from_records(sample.name.clone(), records, n)
}

/// Build one curve per sample, in table column order.
pub fn build_curves(table: &AbundanceTable) -> Result<Vec<SampleCurve>> {
    let samples = table.samples()?;
    Ok(samples.par_iter().map(build_curve).collect())
}
