//! Pareto-Lorenz curve records for a single sample.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One point of a Pareto-Lorenz curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    /// Bin identifier.
    pub bin_id: String,
    /// Relative abundance of this bin.
    pub abundance: f64,
    /// Running total of abundance up to and including this bin.
    pub cumulative_abundance: f64,
    /// Rank (1-based) divided by the number of bins in the sample.
    pub cumulative_proportion: f64,
}

/// A sample's bins ranked by descending abundance with cumulative totals.
///
/// `total_bins` is the bin count at construction time. Truncation drops
/// trailing records but never changes it, so `cumulative_proportion` keeps
/// its original denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleCurve {
    name: String,
    records: Vec<CurveRecord>,
    total_bins: usize,
}

impl SampleCurve {
    pub(crate) fn from_records(name: String, records: Vec<CurveRecord>, total_bins: usize) -> Self {
        Self {
            name,
            records,
            total_bins,
        }
    }

    /// Sample name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Curve records in rank order.
    pub fn records(&self) -> &[CurveRecord] {
        &self.records
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of bins the curve was built from, before any truncation.
    pub fn total_bins(&self) -> usize {
        self.total_bins
    }

    /// Look up the record for a bin.
    pub fn get(&self, bin_id: &str) -> Option<&CurveRecord> {
        self.records.iter().find(|r| r.bin_id == bin_id)
    }

    /// Raw abundances of the retained records.
    pub fn abundances(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.abundance).collect()
    }

    pub fn cumulative_abundances(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.cumulative_abundance).collect()
    }

    pub fn cumulative_proportions(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.cumulative_proportion).collect()
    }

    /// Plot coordinates: (cumulative proportion of bins, cumulative abundance).
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.cumulative_proportion, r.cumulative_abundance))
            .collect()
    }

    /// Copy of this curve keeping only the first `len` records.
    pub(crate) fn truncated(&self, len: usize) -> Self {
        Self {
            name: self.name.clone(),
            records: self.records[..len.min(self.records.len())].to_vec(),
            total_bins: self.total_bins,
        }
    }
}

/// Write every record of every curve to one tab-separated file.
///
/// Columns: sample, bin, abundance, cumulative relative abundance and
/// cumulative proportion of bins. Curves appear in the order given.
pub fn write_curves_tsv<P: AsRef<Path>>(curves: &[SampleCurve], path: P) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)?;

    writer.write_record([
        "sample",
        "bin",
        "abundance",
        "cumulative_relative_abundance",
        "cumulative_proportion_of_bins",
    ])?;

    for curve in curves {
        for r in curve.records() {
            writer.write_record([
                curve.name().to_string(),
                r.bin_id.clone(),
                r.abundance.to_string(),
                r.cumulative_abundance.to_string(),
                r.cumulative_proportion.to_string(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn record(bin: &str, abundance: f64, cum: f64, prop: f64) -> CurveRecord {
        CurveRecord {
            bin_id: bin.to_string(),
            abundance,
            cumulative_abundance: cum,
            cumulative_proportion: prop,
        }
    }

    fn create_test_curve() -> SampleCurve {
        SampleCurve::from_records(
            "Step I".into(),
            vec![
                record("219", 0.7, 0.7, 1.0 / 3.0),
                record("218", 0.3, 1.0, 2.0 / 3.0),
                record("217", 0.1, 1.1, 1.0),
            ],
            3,
        )
    }

    #[test]
    fn test_truncated_keeps_total_bins() {
        let curve = create_test_curve();
        let cut = curve.truncated(2);
        assert_eq!(cut.len(), 2);
        assert_eq!(cut.total_bins(), 3);
        assert_eq!(cut.abundances(), vec![0.7, 0.3]);
        assert_eq!(curve.len(), 3);
    }

    #[test]
    fn test_points_are_proportion_then_abundance() {
        let curve = create_test_curve();
        let points = curve.points();
        assert_eq!(points[1], (2.0 / 3.0, 1.0));
        assert_eq!(curve.get("217").map(|r| r.abundance), Some(0.1));
        assert!(curve.get("999").is_none());
    }

    #[test]
    fn test_write_curves_tsv() {
        let curve = create_test_curve();
        let file = NamedTempFile::new().unwrap();
        write_curves_tsv(&[curve.truncated(2)], file.path()).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("sample\tbin\tabundance"));
        assert!(lines[1].starts_with("Step I\t219\t0.7\t0.7\t"));
        assert!(lines[2].starts_with("Step I\t218\t0.3\t1\t"));
    }
}
