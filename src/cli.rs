use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "visindex",
    version,
    about = "Composite visibility index engine: score, band, trend and forecast"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the index for a snapshot file or a directory of snapshots
    Compute(ComputeCommand),
    /// Compute the index and project it forward under optional scenarios
    Forecast(ForecastCommand),
    /// Check the weight and band invariants of the effective formula
    Validate(ValidateCommand),
}

#[derive(Args)]
pub struct ComputeCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Directory holding visindex.toml (defaults to the current directory)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ForecastCommand {
    pub path: PathBuf,
    /// Driver deltas as visibility,authority,momentum; leave a field empty to skip it
    #[arg(long, allow_hyphen_values = true)]
    pub scenario: Vec<String>,
    /// JSON file holding an array of scenarios
    #[arg(long)]
    pub scenarios: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateCommand {
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: IntegrityReportFormat,
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, ValueEnum)]
pub enum IntegrityReportFormat {
    Json,
    Md,
    Sarif,
}
