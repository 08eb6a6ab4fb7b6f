//! Command-line parsing for the sample-means visualizer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the sampling/statistics code. Every numeric option falls back
//! to a `CLT_*` environment variable (a `.env` file is loaded first).

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    DEFAULT_BINS, DEFAULT_CURVE_POINTS, DEFAULT_N_SAMPLES, DEFAULT_SAMPLE_SIZE, DEFAULT_SCALE,
    DEFAULT_SWEEP_SIZES, VisualizerParams,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "clt",
    version,
    about = "Central Limit Theorem visualizer (exponential sample means)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive chart.
    Tui(ParamArgs),
    /// Print summary statistics and an ASCII chart (or JSON).
    Summary(SummaryArgs),
    /// Compare σ of the sample means against scale/√size for several sizes.
    Sweep(SweepArgs),
}

/// Parameters shared by every command that runs the pipeline.
#[derive(Debug, Args, Clone)]
pub struct ParamArgs {
    /// Exponential scale (population mean); must be > 0.
    #[arg(short = 's', long, env = "CLT_SCALE", default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Number of sample means to draw.
    #[arg(short = 'n', long, env = "CLT_N_SAMPLES", default_value_t = DEFAULT_N_SAMPLES)]
    pub n_samples: usize,

    /// Number of draws averaged into each mean.
    #[arg(short = 'k', long, env = "CLT_SAMPLE_SIZE", default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Random seed (omit for a fresh random stream).
    #[arg(long, env = "CLT_SEED")]
    pub seed: Option<u64>,

    /// Histogram bins.
    #[arg(long, default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// Points on the fitted normal curve.
    #[arg(long, default_value_t = DEFAULT_CURVE_POINTS)]
    pub curve_points: usize,
}

impl ParamArgs {
    pub fn to_params(&self) -> VisualizerParams {
        VisualizerParams {
            scale: self.scale,
            n_samples: self.n_samples,
            sample_size: self.sample_size,
            seed: self.seed,
            bins: self.bins,
            curve_points: self.curve_points,
        }
    }
}

/// Options for the non-interactive summary.
#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Print the run as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Skip the ASCII chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for the convergence sweep.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Exponential scale (population mean); must be > 0.
    #[arg(short = 's', long, env = "CLT_SCALE", default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Number of sample means per size.
    #[arg(short = 'n', long, env = "CLT_N_SAMPLES", default_value_t = DEFAULT_N_SAMPLES)]
    pub n_samples: usize,

    /// Comma-separated sample sizes.
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SWEEP_SIZES)]
    pub sizes: Vec<usize>,

    /// Random seed (omit for a fresh random stream).
    #[arg(long, env = "CLT_SEED")]
    pub seed: Option<u64>,
}
