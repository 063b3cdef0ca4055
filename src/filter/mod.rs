//! Filtering primitives for abundance tables.

pub mod zero_rows;

pub use zero_rows::{remove_zero_rows, zero_row_indices};
