//! pl-curve - Pareto-Lorenz evenness CLI
//!
//! Reads a tab-separated T-RF relative abundance table, draws the
//! Pareto-Lorenz curve of every sample and writes their Gini coefficients.

use clap::{Parser, ValueEnum};
use pl_curve::error::Result;
use pl_curve::pipeline::{Pipeline, PipelineConfig};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Summary format printed to stdout.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Aligned text table
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Pareto-Lorenz curves and Gini coefficients for T-RF abundance data
#[derive(Parser)]
#[command(name = "pl-curve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the relative abundance table (TSV, bins x samples)
    input: PathBuf,

    /// Graph file name (.png, or .svg for vector output)
    #[arg(short, long, default_value = "graph.png")]
    graph: PathBuf,

    /// Output data file name (default: <input>.output.tsv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pipeline configuration YAML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Header of the bin identifier column (overrides the config file)
    #[arg(short, long)]
    key_column: Option<String>,

    /// Also write every retained curve record to this TSV
    #[arg(long)]
    curves: Option<PathBuf>,

    /// Summary format on stdout
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn default_output(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".output.tsv");
    PathBuf::from(name)
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_yaml_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(key_column) = cli.key_column {
        config.key_column = key_column;
    }

    let output = cli.output.unwrap_or_else(|| default_output(&cli.input));

    info!(path = %cli.input.display(), "input file");
    info!(path = %output.display(), "output file");
    info!(path = %cli.graph.display(), "graph file");

    let pipeline = Pipeline::from_config(&config);
    let result =
        pipeline.run_files_with_curves(&cli.input, &cli.graph, &output, cli.curves.as_deref())?;

    match cli.format {
        OutputFormat::Text => print!("{}", result.report),
        OutputFormat::Json => println!("{}", result.report.to_json()?),
    }

    Ok(())
}
