//! Pipeline runner: validation, curve construction, rendering and reporting.

use crate::curve::{build_curves, truncate_all, OVERSHOOT_THRESHOLD};
use crate::data::{write_curves_tsv, AbundanceTable, SampleCurve, SummaryReport, DEFAULT_KEY_COLUMN};
use crate::error::{PlCurveError, Result};
use crate::filter::{remove_zero_rows, zero_row_indices};
use crate::report::{build_summary, render_curves, PlotConfig};
use crate::validate::{validate_columns, SUM_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Pipeline configuration for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Header of the bin identifier column.
    pub key_column: String,
    /// Field delimiter of the input table.
    pub delimiter: char,
    /// Allowed deviation of each column sum from 1.
    pub sum_tolerance: f64,
    /// Cumulative abundance above which a curve is considered complete.
    pub overshoot_threshold: f64,
    /// Figure settings.
    pub plot: PlotConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            delimiter: '\t',
            sum_tolerance: SUM_TOLERANCE,
            overshoot_threshold: OVERSHOOT_THRESHOLD,
            plot: PlotConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(PlCurveError::from)
    }

    /// Load from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(PlCurveError::from)
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(PlCurveError::InvalidParameter(format!(
                "Delimiter {:?} must be a single ASCII character",
                self.delimiter
            )));
        }
        if self.key_column.is_empty() {
            return Err(PlCurveError::InvalidParameter(
                "Key column name must not be empty".to_string(),
            ));
        }
        if !self.sum_tolerance.is_finite() || self.sum_tolerance < 0.0 {
            return Err(PlCurveError::InvalidParameter(
                "Sum tolerance must be a non-negative finite number".to_string(),
            ));
        }
        if !self.overshoot_threshold.is_finite() {
            return Err(PlCurveError::InvalidParameter(
                "Overshoot threshold must be finite".to_string(),
            ));
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(PlCurveError::InvalidParameter(
                "Plot width and height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }
}

/// Everything produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Input table after all-zero bins were removed.
    pub table: AbundanceTable,
    /// Bins dropped because they were zero in every sample.
    pub removed_bins: Vec<String>,
    /// Truncated curves, one per sample in column order.
    pub curves: Vec<SampleCurve>,
    /// Gini statistics, one row per sample in column order.
    pub report: SummaryReport,
}

/// Builder for configuring and running the evenness pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Convert to config for serialization.
    pub fn to_config(&self) -> PipelineConfig {
        self.config.clone()
    }

    /// Current settings.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Set the bin identifier column header.
    pub fn key_column(mut self, key_column: &str) -> Self {
        self.config.key_column = key_column.to_string();
        self
    }

    /// Set the input field delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set the allowed deviation of column sums from 1.
    pub fn sum_tolerance(mut self, tolerance: f64) -> Self {
        self.config.sum_tolerance = tolerance;
        self
    }

    /// Set the truncation threshold for cumulative abundance.
    pub fn overshoot_threshold(mut self, threshold: f64) -> Self {
        self.config.overshoot_threshold = threshold;
        self
    }

    /// Set the figure size in pixels.
    pub fn plot_size(mut self, width: u32, height: u32) -> Self {
        self.config.plot.width = width;
        self.config.plot.height = height;
        self
    }

    /// Set the figure caption.
    pub fn plot_title(mut self, title: &str) -> Self {
        self.config.plot.title = Some(title.to_string());
        self
    }

    /// Read an input table using the configured key column and delimiter.
    pub fn read_table<P: AsRef<Path>>(&self, path: P) -> Result<AbundanceTable> {
        self.config.validate()?;
        AbundanceTable::from_delimited(path, self.config.delimiter_byte(), &self.config.key_column)
    }

    /// Run the in-memory stages on a table.
    ///
    /// Stages: column-sum validation, zero-row removal, curve construction,
    /// truncation and Gini summary. Validation failure stops the run before
    /// any curve is built.
    pub fn run(&self, table: &AbundanceTable) -> Result<PipelineOutput> {
        self.config.validate()?;

        validate_columns(table, self.config.sum_tolerance)?;

        let removed_bins: Vec<String> = zero_row_indices(table)
            .into_iter()
            .map(|row| table.bin_ids()[row].clone())
            .collect();
        let filtered = remove_zero_rows(table)?;

        let curves = truncate_all(&build_curves(&filtered)?, self.config.overshoot_threshold);
        let report = build_summary(&curves);

        info!(
            samples = curves.len(),
            bins = filtered.n_bins(),
            removed = removed_bins.len(),
            "built evenness curves"
        );

        Ok(PipelineOutput {
            table: filtered,
            removed_bins,
            curves,
            report,
        })
    }

    /// Read `input`, run the pipeline, write the figure to `graph` and the
    /// summary table to `output`.
    ///
    /// Nothing is written unless validation succeeds, and a failed write
    /// removes any output already written by this run.
    pub fn run_files<P, G, O>(&self, input: P, graph: G, output: O) -> Result<PipelineOutput>
    where
        P: AsRef<Path>,
        G: AsRef<Path>,
        O: AsRef<Path>,
    {
        self.run_files_with_curves(input, graph, output, None)
    }

    /// Like [`Pipeline::run_files`], also exporting every retained curve
    /// record to `curves` when given.
    pub fn run_files_with_curves<P, G, O>(
        &self,
        input: P,
        graph: G,
        output: O,
        curves: Option<&Path>,
    ) -> Result<PipelineOutput>
    where
        P: AsRef<Path>,
        G: AsRef<Path>,
        O: AsRef<Path>,
    {
        let table = self.read_table(&input)?;
        info!(
            path = %input.as_ref().display(),
            bins = table.n_bins(),
            samples = table.n_samples(),
            "loaded abundance table"
        );

        let result = self.run(&table)?;

        let mut written: Vec<&Path> = Vec::with_capacity(3);
        if let Err(e) = self.write_outputs(&result, graph.as_ref(), output.as_ref(), curves, &mut written) {
            remove_partial_outputs(&written);
            return Err(e);
        }

        Ok(result)
    }

    /// Write curve export, figure and summary in that order, recording
    /// each path before it is written.
    fn write_outputs<'a>(
        &self,
        result: &PipelineOutput,
        graph: &'a Path,
        output: &'a Path,
        curves: Option<&'a Path>,
        written: &mut Vec<&'a Path>,
    ) -> Result<()> {
        if let Some(path) = curves {
            written.push(path);
            write_curves_tsv(&result.curves, path)?;
            info!(path = %path.display(), "wrote curve table");
        }

        written.push(graph);
        render_curves(&result.curves, graph, &self.config.plot)?;

        written.push(output);
        result.report.to_tsv(output)?;
        info!(path = %output.display(), "wrote summary table");

        Ok(())
    }
}

fn remove_partial_outputs(paths: &[&Path]) {
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => warn!(path = %path.display(), "removed partial output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "could not remove partial output"),
        }
    }
}
