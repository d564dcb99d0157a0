use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Load, check and re-export energy-network scenarios and production plans.
#[derive(Parser, Debug)]
#[command(name = "simprod", version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, global = true, default_value = "info")]
    pub log_level: tracing::Level,

    /// TOML file with loader limits and output settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a scenario and print its JSON export
    Scenario {
        /// Scenario JSON file; an empty scenario is used when omitted
        path: Option<PathBuf>,
        /// Report semantic issues and fail if any are found
        #[arg(long)]
        validate: bool,
        /// Print a human-readable summary to stderr
        #[arg(long)]
        describe: bool,
    },
    /// Load a production plan and print its JSON export
    Plan {
        /// Plan JSON file; an empty plan is used when omitted
        path: Option<PathBuf>,
        /// Also write the plan as CSV to this path
        #[arg(long)]
        csv_out: Option<PathBuf>,
        /// Print a human-readable summary to stderr
        #[arg(long)]
        describe: bool,
    },
}
