use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use dbcalc_core::ParameterSet;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate disk space and memory for a dbengine workload
    Estimate(EstimateArgs),

    /// Write a config file holding the default workload
    InitConfig {
        /// Destination path
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Workload flags; each one overrides the config file and environment.
#[derive(Args, Debug, Default)]
pub struct EstimateArgs {
    /// TOML config file with a [workload] table
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Primary collecting nodes
    #[arg(long)]
    pub masters: Option<u32>,

    /// Streaming nodes sending metrics to the master
    #[arg(short, long)]
    pub replicas: Option<u32>,

    /// Average metrics collected per node
    #[arg(short, long)]
    pub metrics: Option<f64>,

    /// Average seconds between collections (`update every`)
    #[arg(short, long)]
    pub interval: Option<f64>,

    /// Days of metrics to keep
    #[arg(long)]
    pub retention: Option<f64>,

    /// Compression savings ratio in percent
    #[arg(long, allow_negative_numbers = true)]
    pub compression: Option<f64>,

    /// Page cache size per instance in MiB (`page cache size`)
    #[arg(long)]
    pub page_cache: Option<f64>,

    /// Print parameters and results as JSON
    #[arg(long, conflicts_with = "snippet_only")]
    pub json: bool,

    /// Print only the configuration snippet
    #[arg(long)]
    pub snippet_only: bool,
}

impl EstimateArgs {
    /// Overlays every flag given on the command line onto `params`.
    pub fn apply(&self, params: &mut ParameterSet) {
        if let Some(v) = self.masters {
            params.master_count = v;
        }
        if let Some(v) = self.replicas {
            params.replica_count = v;
        }
        if let Some(v) = self.metrics {
            params.metric_count = v;
        }
        if let Some(v) = self.interval {
            params.collection_interval_secs = v;
        }
        if let Some(v) = self.retention {
            params.retention_days = v;
        }
        if let Some(v) = self.compression {
            params.compression_savings_percent = v;
        }
        if let Some(v) = self.page_cache {
            params.page_cache_mib = v;
        }
    }
}
