//! Trace Stepper CLI
//!
//! Normalizes raw interpreter traces into canonical steps and lets you
//! look at any step from the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::debug;
use std::path::PathBuf;

use trace_stepper::commands::{
    display_version, execute_inspect, execute_step, execute_validate, validate_args, InspectArgs,
    StepArgs,
};

/// Trace Stepper - step-through execution trace reconstruction
#[derive(Parser, Debug)]
#[command(name = "trace-stepper")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize a raw trace and write the canonical trace document
    Inspect {
        /// Raw trace JSON file
        #[arg(short, long)]
        trace: PathBuf,

        /// Output path for the canonical trace document
        #[arg(short, long, default_value = "trace.canonical.json")]
        output: PathBuf,

        /// Normalizer config file (TOML)
        #[arg(short, long, env = "TRACE_STEPPER_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Check that a raw trace normalizes cleanly
    Validate {
        /// Raw trace JSON file
        #[arg(short, long)]
        trace: PathBuf,

        /// Normalizer config file (TOML)
        #[arg(short, long, env = "TRACE_STEPPER_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print one step of a trace (0-based, clamped into range)
    Step {
        /// Raw trace JSON file
        #[arg(short, long)]
        trace: PathBuf,

        /// Step index to show
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        index: i64,

        /// Normalizer config file (TOML)
        #[arg(short, long, env = "TRACE_STEPPER_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();
    debug!("Command: {:?}", cli.command);

    // Execute command
    match cli.command {
        Commands::Inspect {
            trace,
            output,
            config,
        } => {
            let args = InspectArgs {
                trace,
                output,
                config,
            };

            validate_args(&args)?;
            execute_inspect(args)?;
        }

        Commands::Validate { trace, config } => {
            execute_validate(&trace, config.as_deref())?;
        }

        Commands::Step {
            trace,
            index,
            config,
        } => {
            execute_step(StepArgs {
                trace,
                index,
                config,
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
