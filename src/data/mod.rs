//! Data structures for Pareto-Lorenz evenness analysis.

mod abundance_table;
mod curve;
mod report;
mod sample;

pub use abundance_table::{AbundanceTable, DEFAULT_DELIMITER, DEFAULT_KEY_COLUMN};
pub use curve::{write_curves_tsv, CurveRecord, SampleCurve};
pub use report::{GiniResult, SummaryReport};
pub use sample::Sample;
