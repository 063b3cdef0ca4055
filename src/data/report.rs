//! Gini summary report types.

use crate::error::{PlCurveError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const GINI_HEADER: &str = "Gini";
const CORRECTED_HEADER: &str = "Corrected Gini";
const N_HEADER: &str = "n";

/// Inequality statistics for one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiniResult {
    /// Sample name.
    pub sample: String,
    /// Gini coefficient of the retained abundances.
    pub gini: f64,
    /// Small-sample corrected Gini, `gini * n / (n - 1)`.
    pub corrected_gini: f64,
    /// Number of retained curve records.
    pub n: usize,
}

impl GiniResult {
    /// Check whether either statistic is NaN or infinite.
    ///
    /// Happens for samples with no retained bins, or a single bin where the
    /// correction divides by zero.
    pub fn is_degenerate(&self) -> bool {
        !self.gini.is_finite() || !self.corrected_gini.is_finite()
    }
}

/// Gini results for every sample, in input column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub results: Vec<GiniResult>,
}

impl SummaryReport {
    /// Create a new report.
    pub fn new(results: Vec<GiniResult>) -> Self {
        Self { results }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over results.
    pub fn iter(&self) -> impl Iterator<Item = &GiniResult> {
        self.results.iter()
    }

    /// Look up the result for a sample.
    pub fn get(&self, sample: &str) -> Option<&GiniResult> {
        self.results.iter().find(|r| r.sample == sample)
    }

    /// Write the report to a tab-separated file.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_delimited(path, b'\t')
    }

    /// Write the report to a delimited file.
    ///
    /// The header row is `<empty>, Gini, Corrected Gini, n`; each following
    /// row is labelled with its sample name. Floats use the shortest
    /// representation that parses back to the same value.
    pub fn to_delimited<P: AsRef<Path>>(&self, path: P, delimiter: u8) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(path)?;

        writer.write_record(["", GINI_HEADER, CORRECTED_HEADER, N_HEADER])?;
        for r in &self.results {
            writer.write_record([
                r.sample.clone(),
                r.gini.to_string(),
                r.corrected_gini.to_string(),
                r.n.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Read a report previously written by [`SummaryReport::to_tsv`].
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_delimited(path, b'\t')
    }

    /// Read a report from a delimited file.
    ///
    /// The first column holds sample names; the statistic columns are found
    /// by header name so their order does not matter.
    pub fn from_delimited<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| PlCurveError::MissingColumn(name.to_string()))
        };
        let gini_idx = find(GINI_HEADER)?;
        let corrected_idx = find(CORRECTED_HEADER)?;
        let n_idx = find(N_HEADER)?;

        let mut results = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let parse_f64 = |col: usize| -> Result<f64> {
                record[col].parse().map_err(|_| PlCurveError::InvalidAbundance {
                    value: record[col].to_string(),
                    row,
                    col,
                })
            };
            let n = record[n_idx]
                .parse()
                .map_err(|_| PlCurveError::InvalidAbundance {
                    value: record[n_idx].to_string(),
                    row,
                    col: n_idx,
                })?;

            results.push(GiniResult {
                sample: record[0].to_string(),
                gini: parse_f64(gini_idx)?,
                corrected_gini: parse_f64(corrected_idx)?,
                n,
            });
        }

        Ok(Self::new(results))
    }

    /// Serialize to pretty-printed JSON. Non-finite statistics become `null`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .results
            .iter()
            .map(|r| r.sample.len())
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:<width$}  {:>10}  {:>14}  {:>5}",
            "", GINI_HEADER, CORRECTED_HEADER, N_HEADER
        )?;
        for r in &self.results {
            writeln!(
                f,
                "{:<width$}  {:>10.6}  {:>14.6}  {:>5}",
                r.sample, r.gini, r.corrected_gini, r.n
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_report() -> SummaryReport {
        SummaryReport::new(vec![
            GiniResult {
                sample: "Step I".into(),
                gini: 0.0,
                corrected_gini: 0.0,
                n: 2,
            },
            GiniResult {
                sample: "Step II".into(),
                gini: 0.19999999999999998,
                corrected_gini: 0.39999999999999997,
                n: 2,
            },
            GiniResult {
                sample: "Step III".into(),
                gini: 0.0,
                corrected_gini: f64::NAN,
                n: 1,
            },
        ])
    }

    #[test]
    fn test_tsv_roundtrip() {
        let report = create_test_report();
        let file = NamedTempFile::new().unwrap();
        report.to_tsv(file.path()).unwrap();

        let loaded = SummaryReport::from_tsv(file.path()).unwrap();
        assert_eq!(loaded.len(), 3);
        for (a, b) in loaded.iter().zip(report.iter()) {
            assert_eq!(a.sample, b.sample);
            assert_eq!(a.n, b.n);
            assert_relative_eq!(a.gini, b.gini);
        }
        assert_relative_eq!(loaded.results[1].corrected_gini, 0.4, epsilon = 1e-12);
        assert!(loaded.results[2].corrected_gini.is_nan());
    }

    #[test]
    fn test_header_layout() {
        let report = create_test_report();
        let file = NamedTempFile::new().unwrap();
        report.to_tsv(file.path()).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents.lines().next(), Some("\tGini\tCorrected Gini\tn"));
        assert_eq!(contents.lines().nth(1), Some("Step I\t0\t0\t2"));
    }

    #[test]
    fn test_from_tsv_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "\tGini\tn").unwrap();
        writeln!(file, "S\t0.1\t3").unwrap();
        file.flush().unwrap();

        let result = SummaryReport::from_tsv(file.path());
        assert!(matches!(result, Err(PlCurveError::MissingColumn(ref c)) if c == "Corrected Gini"));
    }

    #[test]
    fn test_degenerate_detection() {
        let report = create_test_report();
        assert!(!report.results[0].is_degenerate());
        assert!(report.results[2].is_degenerate());
        assert_eq!(report.get("Step II").map(|r| r.n), Some(2));
    }

    #[test]
    fn test_json_uses_null_for_nan() {
        let json = create_test_report().to_json().unwrap();
        assert!(json.contains("\"sample\": \"Step III\""));
        assert!(json.contains("\"corrected_gini\": null"));
    }

    #[test]
    fn test_display_keeps_input_order() {
        let text = create_test_report().to_string();
        let step_i = text.find("Step I ").unwrap();
        let step_ii = text.find("Step II ").unwrap();
        assert!(step_i < step_ii);
        assert!(text.lines().next().unwrap().contains("Corrected Gini"));
    }
}
