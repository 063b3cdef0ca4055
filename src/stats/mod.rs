//! Inequality statistics.

pub mod gini;

pub use gini::{corrected_gini, gini, gini_sorted};
