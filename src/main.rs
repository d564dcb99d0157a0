//! simprod entry point: CLI wiring, config loading and JSON/CSV output.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use simprod::cli::{Cli, Commands};
use simprod::config::SimprodConfig;
use simprod::error::Error;
use simprod::io::export::export_plan_csv;
use simprod::io::json::{read_json, write_json};
use simprod::plan::Plan;
use simprod::scenario::Scenario;
use simprod::timeline::Timeline;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(cli.log_level.into()))
        .with_writer(io::stderr)
        .init();

    let Some(command) = cli.command else {
        if let Err(e) = Cli::command().print_help() {
            error!("failed to print help: {e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    match run(command, cli.config.as_deref()) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads the configuration, falling back to defaults without `--config`.
fn load_config(path: Option<&Path>) -> Result<Option<SimprodConfig>, Error> {
    let config = match path {
        Some(path) => SimprodConfig::from_toml_file(path)?,
        None => SimprodConfig::default(),
    };
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(Some(config));
    }
    for e in &errors {
        error!("{e}");
    }
    Ok(None)
}

fn run(command: Commands, config_path: Option<&Path>) -> Result<ExitCode, Error> {
    let Some(config) = load_config(config_path)? else {
        return Ok(ExitCode::FAILURE);
    };
    let indent = config.output.indent;

    match command {
        Commands::Scenario {
            path,
            validate,
            describe,
        } => {
            let limits = config.scenario_limits();
            let scenario = match path {
                Some(path) => Scenario::from_json_with_limits(&read_json(&path)?, limits)?,
                None => Scenario::with_limits(&Timeline::default(), limits),
            };
            if describe {
                eprintln!("{scenario}");
            }
            if validate {
                let issues = scenario.validate();
                if !issues.is_empty() {
                    error!(issues = issues.len(), "scenario failed validation");
                    return Ok(ExitCode::FAILURE);
                }
                info!("scenario is valid");
            }
            write_json(io::stdout().lock(), &scenario.to_json(), indent)?;
        }
        Commands::Plan {
            path,
            csv_out,
            describe,
        } => {
            let plan = match path {
                Some(path) => Plan::from_json(&read_json(&path)?)?,
                None => Plan::new(&Timeline::default()),
            };
            if describe {
                eprintln!("{plan}");
            }
            write_json(io::stdout().lock(), &plan.to_json(), indent)?;
            if let Some(csv_path) = csv_out {
                export_plan_csv(&plan, &csv_path)?;
                info!(path = %csv_path.display(), "plan written as CSV");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
