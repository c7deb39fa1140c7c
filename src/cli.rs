use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "maturity",
    version,
    about = "Regional AI Software Maturity Score calculator"
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
    /// Score and rank regions under one weighting scheme
    Score(ScoreCommand),
    /// Compare rankings across weighting schemes
    Sensitivity(SensitivityCommand),
    /// Check an input table and configuration without scoring
    Validate(ValidateCommand),
    /// List available weighting schemes
    Schemes(SchemesCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Regional input table (.toml or .json)
    pub input: PathBuf,
    #[arg(long)]
    pub scheme: Option<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct SensitivityCommand {
    pub input: PathBuf,
    /// Schemes to compare; all configured schemes when omitted
    #[arg(long = "scheme")]
    pub schemes: Vec<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub input: PathBuf,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct SchemesCommand {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Text,
}
