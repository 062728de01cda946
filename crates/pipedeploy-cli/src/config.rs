//! # Config Subcommand
//!
//! Validates a pipeline or transformation configuration file before it is
//! handed to the pipeline runner.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use serde_json::{Map, Value};

use pipedeploy_schema::{
    PipelineConfigArguments, Record, Schema, SchemaError, TransformationConfigArguments,
    PIPELINE_CONFIG, TRANSFORMATION_CONFIG,
};

use crate::document::load_mapping;
use crate::output::{report, validate_as, OutputFormat, Report};

/// Which configuration schema to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKind {
    /// Top-level pipeline configuration.
    Pipeline,
    /// Transformation (data source) configuration.
    Transformation,
}

impl ConfigKind {
    /// The schema for this kind of configuration.
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Pipeline => &PIPELINE_CONFIG,
            Self::Transformation => &TRANSFORMATION_CONFIG,
        }
    }

    /// Validate a loaded document into this kind's typed configuration.
    pub fn validate(self, input: &Map<String, Value>) -> Result<Record, SchemaError> {
        match self {
            Self::Pipeline => validate_as::<PipelineConfigArguments>(input),
            Self::Transformation => validate_as::<TransformationConfigArguments>(input),
        }
    }
}

/// Arguments for the `pipedeploy config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file (.json, .yaml or .yml).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Kind of configuration the file holds.
    #[arg(long, value_enum)]
    pub kind: ConfigKind,
}

/// Load and validate a configuration file, rendering the report.
///
/// # Errors
///
/// Fails when the file cannot be read or parsed, or is not a mapping.
pub fn check_config(args: &ConfigArgs, format: OutputFormat) -> Result<Report> {
    let input = load_mapping(&args.path)
        .with_context(|| format!("failed to load configuration {}", args.path.display()))?;
    report(
        &args.path.display().to_string(),
        args.kind.schema(),
        args.kind.validate(&input),
        format,
    )
}

/// Execute the config subcommand.
///
/// Returns exit code: 0 when valid, 1 on validation failure.
pub fn run_config(args: &ConfigArgs, format: OutputFormat) -> Result<u8> {
    let report = check_config(args, format)?;
    println!("{}", report.rendered);
    Ok(report.exit_code())
}
