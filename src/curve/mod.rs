//! Pareto-Lorenz curve construction.
//!
//! - **builder**: rank bins by abundance and accumulate totals
//! - **truncate**: drop records past the point where abundance reaches 1

pub mod builder;
pub mod truncate;

pub use builder::{build_curve, build_curves, sort_bins};
pub use truncate::{
    truncate_all, truncate_at_full_abundance, truncate_at_threshold, OVERSHOOT_THRESHOLD,
};
