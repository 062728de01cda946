//! # pipedeploy CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pipedeploy_cli::args::{run_args, CommandlineArgs};
use pipedeploy_cli::config::{run_config, ConfigArgs};
use pipedeploy_cli::version::{run_version, VersionArgs};
use pipedeploy_cli::OutputFormat;

/// Pipeline deployment helper — argument and configuration validation.
///
/// Checks run arguments, configuration files, and release versions before
/// they are handed to the pipeline runner.
#[derive(Parser, Debug)]
#[command(name = "pipedeploy", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate pipeline run arguments (module and date window).
    Args(CommandlineArgs),

    /// Validate a pipeline or transformation configuration file.
    Config(ConfigArgs),

    /// Validate a release version string.
    Version(VersionArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("pipedeploy CLI starting");

    let result = match cli.command {
        Commands::Args(args) => run_args(&args, cli.format),
        Commands::Config(args) => run_config(&args, cli.format),
        Commands::Version(args) => run_version(&args, cli.format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
