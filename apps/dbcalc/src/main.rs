//! CLI for sizing dbengine disk space and memory.
//!
//! Provides commands for:
//! - Estimating disk, memory and the `dbengine disk space` setting
//! - Writing a default workload config file

mod cli;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dbcalc_core::config::{CalcConfig, OutputFormat};
use dbcalc_core::report::Report;
use dbcalc_core::CapacityEstimator;
use tracing::level_filters::LevelFilter;

use cli::{Cli, Commands, EstimateArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Estimate(args) => run_estimate(&args, |key| std::env::var(key).ok()),
        Commands::InitConfig { path, force } => init_config(&path, force),
    }
}

/// Loads the config file, applies environment and flag overrides, then
/// prints the estimate. `env` resolves `DBCALC_*` override variables.
fn run_estimate<F>(args: &EstimateArgs, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &args.config {
        Some(path) => CalcConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CalcConfig::default(),
    };
    config.apply_overrides_from(env)?;
    args.apply(&mut config.workload);
    if args.json {
        config.output = OutputFormat::Json;
    }

    let valid = config
        .workload
        .validate()
        .context("Invalid workload parameters")?;
    let result = CapacityEstimator::compute(&valid);
    tracing::info!(
        nodes = valid.node_count(),
        disk_mib = result.required_disk_mib,
        memory_mib = result.required_memory_mib,
        "estimate ready"
    );

    if args.snippet_only {
        println!("{}", result.config_snippet);
        return Ok(());
    }

    let report = Report::new(&valid, &result);
    match config.output {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    CalcConfig::default()
        .save_to_file(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default workload to {}", path.display());
    Ok(())
}
