//! Pareto-Lorenz curve figures using plotters.
//!
//! A [`CurveFigure`] owns everything it draws. Curves are added one at a
//! time and the figure is consumed by [`CurveFigure::save`], which renders
//! and flushes the image in one call. Output is PNG unless the path ends in
//! `.svg`.

use crate::data::SampleCurve;
use crate::error::{PlCurveError, Result};
use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters_backend::DrawingErrorKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// X axis label.
pub const X_LABEL: &str = "Cumulative Prop TRF";
/// Y axis label.
pub const Y_LABEL: &str = "Cumulative Relative Abundance";
/// Upper bound of the Y axis, leaving headroom above full abundance.
pub const Y_MAX: f64 = 1.05;

const GRID_STEP: f64 = 0.1;

type CurveChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;
type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Image settings for curve figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Optional caption above the chart.
    pub title: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: None,
        }
    }
}

/// Point marker drawn on each curve vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerStyle {
    Cross,
    Pixel,
    Circle,
    LargeCross,
    Dot,
    Triangle,
    FilledTriangle,
    FilledCircle,
    LargeCircle,
}

impl MarkerStyle {
    /// Markers in assignment order.
    pub const ALL: [MarkerStyle; 9] = [
        MarkerStyle::Cross,
        MarkerStyle::Pixel,
        MarkerStyle::Circle,
        MarkerStyle::LargeCross,
        MarkerStyle::Dot,
        MarkerStyle::Triangle,
        MarkerStyle::FilledTriangle,
        MarkerStyle::FilledCircle,
        MarkerStyle::LargeCircle,
    ];

    /// Marker for the `index`-th curve; cycles past the end of the list.
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    fn draw<DB: DrawingBackend>(
        self,
        chart: &mut CurveChart<'_, DB>,
        points: &[(f64, f64)],
        color: RGBAColor,
    ) -> DrawResult<DB> {
        let line = color.stroke_width(1);
        let fill = color.filled();
        let pts = points.iter().copied();
        match self {
            Self::Cross => chart.draw_series(pts.map(|p| Cross::new(p, 4, line)))?,
            Self::Pixel => chart.draw_series(pts.map(|p| Pixel::new(p, fill)))?,
            Self::Circle => chart.draw_series(pts.map(|p| Circle::new(p, 4, line)))?,
            Self::LargeCross => chart.draw_series(pts.map(|p| Cross::new(p, 6, color.stroke_width(2))))?,
            Self::Dot => chart.draw_series(pts.map(|p| Circle::new(p, 2, fill)))?,
            Self::Triangle => chart.draw_series(pts.map(|p| TriangleMarker::new(p, 5, line)))?,
            Self::FilledTriangle => chart.draw_series(pts.map(|p| TriangleMarker::new(p, 5, fill)))?,
            Self::FilledCircle => chart.draw_series(pts.map(|p| Circle::new(p, 4, fill)))?,
            Self::LargeCircle => chart.draw_series(pts.map(|p| Circle::new(p, 7, line)))?,
        };
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct FigureSeries {
    name: String,
    points: Vec<(f64, f64)>,
    marker: MarkerStyle,
    color: RGBAColor,
}

/// An owned figure of Pareto-Lorenz curves on shared axes.
///
/// Axes span [0, 1] × [0, 1.05] with a grid and a diagonal from (0, 0) to
/// (1, 1) marking perfect evenness. Each curve gets its own marker and
/// colour and a legend entry named after its sample.
#[derive(Debug, Clone)]
pub struct CurveFigure {
    config: PlotConfig,
    series: Vec<FigureSeries>,
}

impl CurveFigure {
    /// Create an empty figure.
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            series: Vec::new(),
        }
    }

    /// Add a curve; marker and colour follow insertion order.
    pub fn add_curve(&mut self, curve: &SampleCurve) -> &mut Self {
        let index = self.series.len();
        self.series.push(FigureSeries {
            name: curve.name().to_string(),
            points: curve.points(),
            marker: MarkerStyle::for_index(index),
            color: Palette99::pick(index).mix(1.0),
        });
        self
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Render the figure and write it to `path`.
    ///
    /// If text cannot be drawn because no usable font is available, the
    /// figure is rendered again without captions, axis labels or legend.
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<()> {
        let path = path.as_ref();
        let svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        let size = self.size();
        with_text_fallback(|labelled| {
            if svg {
                self.present(SVGBackend::new(path, size).into_drawing_area(), labelled)
            } else {
                self.present(BitMapBackend::new(path, size).into_drawing_area(), labelled)
            }
        })?;

        info!(path = %path.display(), curves = self.len(), "wrote figure");
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn present<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        labelled: bool,
    ) -> std::result::Result<(), FigureError> {
        let drawn = if labelled {
            self.draw_labelled(&root)
        } else {
            self.draw_plain(&root)
        };
        drawn
            .and_then(|()| root.present())
            .map_err(FigureError::from_drawing::<DB>)
    }

    fn draw_labelled<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        root.fill(&WHITE)?;

        let mut builder = ChartBuilder::on(root);
        builder.margin(20).x_label_area_size(40).y_label_area_size(60);
        if let Some(title) = &self.config.title {
            builder.caption(title, ("sans-serif", 22));
        }
        let mut chart = builder.build_cartesian_2d(0f64..1f64, 0f64..Y_MAX)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()?;

        draw_diagonal(&mut chart)?;

        for s in &self.series {
            let color = s.color;
            chart
                .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))?
                .label(s.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            s.marker.draw(&mut chart, &s.points, color)?;
        }

        if !self.series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        Ok(())
    }

    fn draw_plain<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .build_cartesian_2d(0f64..1f64, 0f64..Y_MAX)?;

        let grid = BLACK.mix(0.1).stroke_width(1);
        let steps = (1.0 / GRID_STEP).round() as usize;
        for i in 0..=steps {
            let v = i as f64 * GRID_STEP;
            chart.draw_series(std::iter::once(PathElement::new(vec![(v, 0.0), (v, Y_MAX)], grid)))?;
            chart.draw_series(std::iter::once(PathElement::new(vec![(0.0, v), (1.0, v)], grid)))?;
        }

        draw_diagonal(&mut chart)?;

        for s in &self.series {
            chart.draw_series(LineSeries::new(s.points.iter().copied(), s.color.stroke_width(2)))?;
            s.marker.draw(&mut chart, &s.points, s.color)?;
        }

        Ok(())
    }
}

fn draw_diagonal<DB: DrawingBackend>(chart: &mut CurveChart<'_, DB>) -> DrawResult<DB> {
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (1.0, 1.0)],
        BLACK.stroke_width(1),
    )))?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum FigureError {
    #[error("{0}")]
    Font(String),
    #[error("{0}")]
    Other(String),
}

impl FigureError {
    fn from_drawing<DB: DrawingBackend>(err: DrawingAreaErrorKind<DB::ErrorType>) -> Self {
        match &err {
            DrawingAreaErrorKind::BackendError(DrawingErrorKind::FontError(_)) => {
                Self::Font(err.to_string())
            }
            _ => Self::Other(err.to_string()),
        }
    }
}

/// Run `render` with text, and once more without it if no font is usable.
fn with_text_fallback<F>(mut render: F) -> Result<()>
where
    F: FnMut(bool) -> std::result::Result<(), FigureError>,
{
    match render(true) {
        Ok(()) => Ok(()),
        Err(FigureError::Font(msg)) => {
            warn!(error = %msg, "font unavailable; rendering figure without text");
            render(false).map_err(|e| PlCurveError::Plot(e.to_string()))
        }
        Err(FigureError::Other(msg)) => Err(PlCurveError::Plot(msg)),
    }
}

/// Render all curves into one figure at `path`.
pub fn render_curves<P: AsRef<Path>>(curves: &[SampleCurve], path: P, config: &PlotConfig) -> Result<()> {
    let mut figure = CurveFigure::new(config.clone());
    for curve in curves {
        figure.add_curve(curve);
    }
    figure.save(path)
}
