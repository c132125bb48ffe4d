mod cli;

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use visindex::provider::{self, JsonSnapshotProvider, SnapshotProvider};
use visindex::report::{self, IntegrityFormat, OutputFormat};
use visindex::types::forecast::ForecastScenario;
use visindex::{config, ComputedIndex, IndexEngine, IndexError};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_FORMULA: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_root(config_dir: Option<PathBuf>) -> Result<PathBuf, IndexError> {
    match config_dir {
        Some(dir) if !dir.exists() => Err(IndexError::PathNotFound(dir.display().to_string())),
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}

fn load_engine(config_dir: Option<PathBuf>) -> Result<IndexEngine, IndexError> {
    let root = config_root(config_dir)?;
    let formula = config::load_formula(&root)?;
    tracing::debug!(formula = %formula.as_text(), "formula loaded");
    IndexEngine::new(formula)
}

/// Indexes for every snapshot that computed, plus how many failed.
/// Each failure is reported on stderr and does not stop the batch.
fn compute_all(
    engine: &IndexEngine,
    path: &Path,
) -> Result<(Vec<ComputedIndex>, usize), IndexError> {
    let snapshots = JsonSnapshotProvider::new(path).snapshots()?;
    let mut indexes = Vec::with_capacity(snapshots.len());
    let mut failed = 0;
    for (org_id, outcome) in engine.compute_each(&snapshots) {
        match outcome {
            Ok(index) => indexes.push(index),
            Err(err) => {
                tracing::warn!(org_id, error = %err, "index computation failed");
                eprintln!("error: {org_id}: {err}");
                failed += 1;
            }
        }
    }
    tracing::info!(computed = indexes.len(), failed, "indexes computed");
    Ok((indexes, failed))
}

fn batch_exit_code(failed: usize) -> i32 {
    if failed > 0 {
        exit_code::RUNTIME_FAILURE
    } else {
        exit_code::SUCCESS
    }
}

fn output_format(format: &cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

fn run(cli: cli::Cli) -> Result<i32, IndexError> {
    match cli.command {
        cli::Commands::Compute(cmd) => {
            let engine = load_engine(cmd.config_dir)?;
            let (indexes, failed) = compute_all(&engine, &cmd.path)?;
            let rendered = report::render_indexes(&indexes, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(batch_exit_code(failed))
        }
        cli::Commands::Forecast(cmd) => {
            let engine = load_engine(cmd.config_dir)?;
            let mut scenarios = cmd
                .scenario
                .iter()
                .map(|spec| provider::parse_scenario(spec))
                .collect::<Result<Vec<ForecastScenario>, _>>()?;
            if let Some(path) = &cmd.scenarios {
                scenarios.extend(provider::read_scenarios(path)?);
            }
            tracing::info!(scenarios = scenarios.len(), "forecasting");

            let (indexes, failed) = compute_all(&engine, &cmd.path)?;
            let forecasts = indexes
                .iter()
                .map(|index| engine.compute_forecast(index, &scenarios))
                .collect::<Vec<_>>();
            let rendered = report::render_forecasts(&forecasts, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(batch_exit_code(failed))
        }
        cli::Commands::Validate(cmd) => {
            let root = config_root(cmd.config_dir)?;
            let result = config::integrity_report(&root)?;
            let format = match cmd.format {
                cli::IntegrityReportFormat::Json => IntegrityFormat::Json,
                cli::IntegrityReportFormat::Md => IntegrityFormat::Md,
                cli::IntegrityReportFormat::Sarif => IntegrityFormat::Sarif,
            };
            println!("{}", report::render_integrity(&result, format)?);

            if result.valid {
                Ok(exit_code::SUCCESS)
            } else {
                for issue in &result.issues {
                    eprintln!("integrity: {issue}");
                }
                Ok(exit_code::INVALID_FORMULA)
            }
        }
    }
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "visindex starting");

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
