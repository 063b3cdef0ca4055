//! Pipeline composition and execution.

mod runner;

pub use runner::{Pipeline, PipelineConfig, PipelineOutput};
