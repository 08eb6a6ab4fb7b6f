//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - runs the sample-means pipeline
//! - renders the interactive chart, or prints summaries/plots/sweeps

use clap::Parser;

use crate::cli::{Command, ParamArgs, SummaryArgs, SweepArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `clt` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `clt` and `clt -s 3` behave like `clt tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Summary(args) => handle_summary(args),
        Command::Sweep(args) => handle_sweep(args),
    }
}

fn handle_tui(args: ParamArgs) -> Result<(), AppError> {
    crate::tui::run(args.to_params())
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let run = pipeline::run_visualizer(&args.params.to_params())?;

    if args.json {
        println!("{}", crate::report::to_json(&run)?);
        return Ok(());
    }

    println!("{}", crate::report::format_summary(&run));
    if !args.no_plot {
        println!(
            "{}",
            crate::plot::render_ascii_histogram(&run, args.width, args.height)
        );
    }
    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let rows = pipeline::run_sweep(args.scale, args.n_samples, &args.sizes, seed)?;
    print!(
        "{}",
        crate::report::format_sweep(args.scale, args.n_samples, seed, &rows)
    );
    Ok(())
}

/// Rewrite argv so `clt` defaults to `clt tui`.
///
/// Rules:
/// - `clt`                      -> `clt tui`
/// - `clt -s 3 ...`             -> `clt tui -s 3 ...`
/// - `clt --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "summary" | "sweep");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
