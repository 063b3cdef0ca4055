//! Pareto-Lorenz evenness curves and Gini coefficients for T-RF data
//!
//! This library ranks the bins (terminal restriction fragments) of each
//! sample in a relative abundance table, accumulates them into
//! Pareto-Lorenz curves, and summarises each sample's evenness with a Gini
//! coefficient.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (AbundanceTable, SampleCurve, SummaryReport)
//! - **validate**: Column-sum checks (every sample must sum to 1)
//! - **filter**: Removal of bins absent from every sample
//! - **curve**: Curve construction and truncation at full abundance
//! - **stats**: Gini coefficient and small-sample correction
//! - **report**: Summary assembly and figure rendering
//! - **pipeline**: Pipeline configuration and execution
//!
//! # Example
//!
//! ```no_run
//! use pl_curve::prelude::*;
//!
//! let output = Pipeline::new()
//!     .run_files("trfs.tsv", "graph.png", "trfs.tsv.output.tsv")
//!     .unwrap();
//!
//! for result in output.report.iter() {
//!     println!("{}: {:.3}", result.sample, result.gini);
//! }
//! ```

pub mod curve;
pub mod data;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod validate;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::curve::{
        build_curve, build_curves, sort_bins, truncate_all, truncate_at_full_abundance,
        truncate_at_threshold, OVERSHOOT_THRESHOLD,
    };
    pub use crate::data::{
        write_curves_tsv, AbundanceTable, CurveRecord, GiniResult, Sample, SampleCurve,
        SummaryReport,
    };
    pub use crate::error::{PlCurveError, Result};
    pub use crate::filter::{remove_zero_rows, zero_row_indices};
    pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineOutput};
    pub use crate::report::{
        build_summary, gini_result, render_curves, CurveFigure, MarkerStyle, PlotConfig,
    };
    pub use crate::stats::{corrected_gini, gini, gini_sorted};
    pub use crate::validate::{check_columns, validate_columns, SUM_TOLERANCE};
}
