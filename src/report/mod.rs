//! Report assembly and rendering.

pub mod plot;
pub mod summary;

pub use plot::{render_curves, CurveFigure, MarkerStyle, PlotConfig, X_LABEL, Y_LABEL, Y_MAX};
pub use summary::{build_summary, gini_result};
