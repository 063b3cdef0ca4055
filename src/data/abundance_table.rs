//! Relative abundance table for T-RF community profiles.

use super::Sample;
use crate::error::{PlCurveError, Result};
use nalgebra::DMatrix;
use rayon::prelude::*;
use std::path::Path;

/// Header of the bin identifier column in input tables.
pub const DEFAULT_KEY_COLUMN: &str = "Bin";

/// Input tables are tab-separated.
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// A dense table of relative abundances.
///
/// Rows represent bins (T-RF fragment identifiers), columns represent samples
/// or time steps. Each sample column is expected to sum to 1, but this is
/// only checked by [`crate::validate::check_columns`], never enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct AbundanceTable {
    /// Relative abundances (bins × samples)
    data: DMatrix<f64>,
    /// Bin identifiers (row names)
    bin_ids: Vec<String>,
    /// Sample names (column headers)
    sample_ids: Vec<String>,
}

impl AbundanceTable {
    /// Create a new AbundanceTable from a matrix and identifiers.
    pub fn new(data: DMatrix<f64>, bin_ids: Vec<String>, sample_ids: Vec<String>) -> Result<Self> {
        let (nrows, ncols) = data.shape();
        if nrows != bin_ids.len() {
            return Err(PlCurveError::DimensionMismatch {
                expected: nrows,
                actual: bin_ids.len(),
            });
        }
        if ncols != sample_ids.len() {
            return Err(PlCurveError::DimensionMismatch {
                expected: ncols,
                actual: sample_ids.len(),
            });
        }
        Ok(Self {
            data,
            bin_ids,
            sample_ids,
        })
    }

    /// Build a table from named sample columns sharing one set of bins.
    pub fn from_columns(bin_ids: Vec<String>, columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        let n_bins = bin_ids.len();
        let mut data = DMatrix::zeros(n_bins, columns.len());
        let mut sample_ids = Vec::with_capacity(columns.len());

        for (j, (name, values)) in columns.into_iter().enumerate() {
            if values.len() != n_bins {
                return Err(PlCurveError::DimensionMismatch {
                    expected: n_bins,
                    actual: values.len(),
                });
            }
            for (i, value) in values.into_iter().enumerate() {
                data[(i, j)] = value;
            }
            sample_ids.push(name);
        }

        Self::new(data, bin_ids, sample_ids)
    }

    /// Load a table from a tab-separated file keyed by the `Bin` column.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_delimited(path, DEFAULT_DELIMITER, DEFAULT_KEY_COLUMN)
    }

    /// Load a table from a delimited file.
    ///
    /// Expected format:
    /// - First row: header naming the key column and every sample
    /// - Subsequent rows: bin identifier and one abundance per sample
    ///
    /// The key column may sit anywhere in the header; all other columns are
    /// samples, kept in file order.
    pub fn from_delimited<P: AsRef<Path>>(path: P, delimiter: u8, key_column: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let key_idx = headers
            .iter()
            .position(|h| h == key_column)
            .ok_or_else(|| PlCurveError::MissingColumn(key_column.to_string()))?;

        let sample_cols: Vec<usize> = (0..headers.len()).filter(|&c| c != key_idx).collect();
        if sample_cols.is_empty() {
            return Err(PlCurveError::EmptyData(
                "Table must have at least one sample column".to_string(),
            ));
        }
        let sample_ids: Vec<String> = sample_cols.iter().map(|&c| headers[c].to_string()).collect();

        let mut bin_ids = Vec::new();
        let mut values = Vec::new();

        for (row_idx, record) in reader.records().enumerate() {
            let record = record?;
            bin_ids.push(record[key_idx].to_string());

            for (col_idx, &c) in sample_cols.iter().enumerate() {
                let field = &record[c];
                let value: f64 = field.parse().map_err(|_| PlCurveError::InvalidAbundance {
                    value: field.to_string(),
                    row: row_idx,
                    col: col_idx,
                })?;
                values.push(value);
            }
        }

        let data = DMatrix::from_row_slice(bin_ids.len(), sample_ids.len(), &values);
        Self::new(data, bin_ids, sample_ids)
    }

    /// Get the abundance at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    /// Number of bins (rows).
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.data.nrows()
    }

    /// Number of samples (columns).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.ncols()
    }

    /// Bin identifiers.
    #[inline]
    pub fn bin_ids(&self) -> &[String] {
        &self.bin_ids
    }

    /// Sample names.
    #[inline]
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Get reference to the underlying matrix.
    #[inline]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Get a row (bin) as a vector.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.data.row(row).iter().copied().collect()
    }

    /// Get a column (sample) as a vector.
    pub fn col(&self, col: usize) -> Vec<f64> {
        self.data.column(col).iter().copied().collect()
    }

    /// Extract one sample column together with the bin identifiers.
    pub fn sample(&self, col: usize) -> Result<Sample> {
        if col >= self.n_samples() {
            return Err(PlCurveError::InvalidParameter(format!(
                "Sample index {} out of bounds",
                col
            )));
        }
        Sample::new(self.sample_ids[col].clone(), self.bin_ids.clone(), self.col(col))
    }

    /// Extract every sample in column order.
    pub fn samples(&self) -> Result<Vec<Sample>> {
        (0..self.n_samples()).map(|col| self.sample(col)).collect()
    }

    /// Compute row sums (total abundance per bin across samples).
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.n_bins())
            .into_par_iter()
            .map(|row| self.data.row(row).iter().sum())
            .collect()
    }

    /// Compute column sums (total abundance per sample), summed in row order.
    pub fn col_sums(&self) -> Vec<f64> {
        (0..self.n_samples())
            .map(|col| self.data.column(col).iter().sum())
            .collect()
    }

    /// Subset the table to include only specified bins (by index), in the given order.
    pub fn subset_bins(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.n_bins()) {
            return Err(PlCurveError::InvalidParameter(format!(
                "Bin index {} out of bounds",
                bad
            )));
        }

        let data = self.data.select_rows(indices);
        let bin_ids = indices.iter().map(|&i| self.bin_ids[i].clone()).collect();

        Self::new(data, bin_ids, self.sample_ids.clone())
    }
}
