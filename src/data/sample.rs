//! A single sample column of an abundance table.

use crate::error::{PlCurveError, Result};

/// One sample (column): bin identifiers paired with relative abundances.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Sample name (column header).
    pub name: String,
    /// Bin identifiers, in table row order.
    pub bin_ids: Vec<String>,
    /// Relative abundance of each bin.
    pub abundances: Vec<f64>,
}

impl Sample {
    /// Create a sample, checking that every bin has exactly one abundance.
    pub fn new(name: String, bin_ids: Vec<String>, abundances: Vec<f64>) -> Result<Self> {
        if bin_ids.len() != abundances.len() {
            return Err(PlCurveError::DimensionMismatch {
                expected: bin_ids.len(),
                actual: abundances.len(),
            });
        }
        Ok(Self {
            name,
            bin_ids,
            abundances,
        })
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.abundances.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.abundances.is_empty()
    }

    /// Total abundance across all bins.
    pub fn total(&self) -> f64 {
        self.abundances.iter().sum()
    }

    /// Iterate over (bin, abundance) pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.bin_ids
            .iter()
            .map(String::as_str)
            .zip(self.abundances.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch() {
        let result = Sample::new("S".into(), vec!["a".into()], vec![0.5, 0.5]);
        assert!(result.is_err());
    }

    #[test]
    fn test_iter_pairs_bins_with_values() {
        let sample = Sample::new("S".into(), vec!["a".into(), "b".into()], vec![0.2, 0.8]).unwrap();
        let pairs: Vec<_> = sample.iter().collect();
        assert_eq!(pairs, vec![("a", 0.2), ("b", 0.8)]);
        assert_eq!(sample.total(), 1.0);
    }
}
