mod commands;
mod config;
mod errors;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use config::{GenerationArgs, PathArgs};
use errors::{CliError, CliResult};
use logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "ecomgen",
    version,
    about = "Synthetic e-commerce data pipeline: generate, load, report"
)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,
    /// Log filter for stderr and the log file (e.g. info, debug).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Append JSON log lines to this file.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the five synthetic CSV files.
    Generate(GenerationArgs),
    /// Load the CSV files into SQLite and print the validation report.
    Load(LoadArgs),
    /// Run the aggregation reports and export them as CSV.
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// Also write the validation report as JSON.
    #[arg(long, value_name = "FILE")]
    metrics: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Skip a failed query and continue; the exit code is still non-zero.
    #[arg(long, default_value_t = false)]
    keep_going: bool,
    /// Run only this query (repeatable).
    #[arg(long = "query", value_name = "NAME")]
    queries: Vec<String>,
}

impl Command {
    fn stage(&self) -> &'static str {
        match self {
            Command::Generate(_) => "generate",
            Command::Load(_) => "load",
            Command::Report(_) => "report",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.log_level, cli.log_file.as_deref()) {
        eprintln!("fatal: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            eprintln!("fatal: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let run_id = Uuid::new_v4().to_string();
    let stage = cli.command.stage();
    tracing::info!(event = "run_started", run_id = %run_id, stage);
    let timer = Instant::now();

    match cli.command {
        Command::Generate(args) => {
            let config = config::resolve(&cli.paths, Some(&args)).map_err(config_error(stage))?;
            commands::generate::run(&config)?;
        }
        Command::Load(args) => {
            let config = config::resolve(&cli.paths, None).map_err(config_error(stage))?;
            commands::load::run(&config, args.metrics.as_deref())?;
        }
        Command::Report(args) => {
            let config = config::resolve(&cli.paths, None).map_err(config_error(stage))?;
            commands::report::run(&config, args.keep_going, args.queries)?;
        }
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", run_id = %run_id, stage, status = "success", duration_ms);
    Ok(())
}

fn config_error(stage: &'static str) -> impl Fn(ecomgen_core::Error) -> CliError {
    move |source| CliError::Config { stage, source }
}
