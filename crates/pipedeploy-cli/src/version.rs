//! # Version Subcommand
//!
//! Checks that a release version follows the MAJOR.MINOR.PATCH convention
//! before a deployment is tagged with it.

use anyhow::Result;
use clap::Args;
use serde_json::{Map, Value};

use pipedeploy_schema::rules::release_version;
use pipedeploy_schema::{FieldSpec, Schema, UnknownFieldPolicy};

use crate::output::{report, OutputFormat, Report};

/// Single-field schema for a release version.
pub static RELEASE: Schema = Schema {
    name: "release",
    fields: &[FieldSpec::required("version", release_version)],
    cross_field_rules: &[],
    unknown_fields: UnknownFieldPolicy::Reject,
};

/// Arguments for the `pipedeploy version` subcommand.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Release version to check, e.g. `1.4.0` or `0.1.0-rc1`.
    #[arg(value_name = "VERSION")]
    pub version: String,
}

/// Validate a release version and render the report.
pub fn check_version(args: &VersionArgs, format: OutputFormat) -> Result<Report> {
    let mut input = Map::new();
    input.insert("version".to_string(), Value::String(args.version.clone()));
    report("release version", &RELEASE, RELEASE.validate(&input), format)
}

/// Execute the version subcommand.
///
/// Returns exit code: 0 when valid, 1 on validation failure.
pub fn run_version(args: &VersionArgs, format: OutputFormat) -> Result<u8> {
    let report = check_version(args, format)?;
    println!("{}", report.rendered);
    Ok(report.exit_code())
}
