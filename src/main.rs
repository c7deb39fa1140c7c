mod cli;
mod config;
mod engine;
mod error;
mod report;
mod types;

use crate::error::MaturityError;
use crate::types::config::MaturityConfig;
use crate::types::input::load_input;
use crate::types::scoring::WeightScheme;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn input_root(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
        cli::ReportFormat::Text => report::OutputFormat::Text,
    }
}

fn resolve_schemes(
    cfg: &MaturityConfig,
    names: &[String],
) -> Result<Vec<WeightScheme>, MaturityError> {
    if names.is_empty() {
        return cfg.schemes();
    }
    let mut schemes: Vec<WeightScheme> = Vec::new();
    for name in names {
        if schemes.iter().any(|scheme| &scheme.name == name) {
            continue;
        }
        schemes.push(cfg.scheme(name)?);
    }
    Ok(schemes)
}

fn run() -> Result<i32, MaturityError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    info!(version = env!("CARGO_PKG_VERSION"), "maturity starting");

    match cli.command {
        cli::Commands::Score(cmd) => {
            let table = load_input(&cmd.input)?;
            let cfg = config::load_config(&input_root(&cmd.input), cmd.config.as_deref())?;
            let scheme = match &cmd.scheme {
                Some(name) => cfg.scheme(name)?,
                None => cfg.default_scheme()?,
            };

            let inputs = table.into_inputs()?;
            let maturity_report = engine::score_regions(&inputs, &scheme)?;
            let rendered =
                report::render(&maturity_report, output_format(&cmd.format), cfg.decimals())?;
            println!("{rendered}");

            if maturity_report.degenerate_length_normalization {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Sensitivity(cmd) => {
            let table = load_input(&cmd.input)?;
            let cfg = config::load_config(&input_root(&cmd.input), cmd.config.as_deref())?;
            let schemes = resolve_schemes(&cfg, &cmd.schemes)?;

            let inputs = table.into_inputs()?;
            let sensitivity = engine::run_sensitivity_analysis(&inputs, &schemes)?;
            let rendered = report::render_sensitivity(
                &sensitivity,
                output_format(&cmd.format),
                cfg.decimals(),
            )?;
            println!("{rendered}");

            if sensitivity.degenerate_length_normalization || !sensitivity.top_region_stable {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Validate(cmd) => {
            let table = load_input(&cmd.input)?;
            let mut problems = table.problems();
            if let Err(e) = config::load_config(&input_root(&cmd.input), cmd.config.as_deref()) {
                problems.push(e);
            }

            if problems.is_empty() {
                println!("validate: {} region(s) ok", table.rows.len());
                return Ok(exit_code::SUCCESS);
            }

            for problem in &problems {
                println!("[INVALID] {problem}");
            }
            Ok(exit_code::INVALID_INPUT)
        }
        cli::Commands::Schemes(cmd) => {
            let root = std::env::current_dir()?;
            let cfg = config::load_config(&root, cmd.config.as_deref())?;
            let default_name = cfg.default_scheme_name().to_string();
            for scheme in cfg.schemes()? {
                let marker = if scheme.name == default_name { "*" } else { " " };
                println!(
                    "{} {:<20} collaboration={:.4} length_efficiency={:.4} complexity={:.4}",
                    marker,
                    scheme.name,
                    scheme.weights.collaboration(),
                    scheme.weights.length_efficiency(),
                    scheme.weights.complexity()
                );
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
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
