//! Input validation for abundance tables.

pub mod columns;

pub use columns::{
    check_columns, check_columns_with_tolerance, column_sums, sums_to_one, validate_columns,
    SUM_TOLERANCE,
};
