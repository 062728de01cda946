//! # Report Rendering
//!
//! Every subcommand ends in the same shape of report: `OK: <subject>`
//! followed by the normalized fields, or `FAIL: <subject>` followed by one
//! line per violation. `--format json` renders the same content as a single
//! JSON object for CI consumption.

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde_json::json;

use serde_json::{Map, Value};

use pipedeploy_schema::{Arguments, Record, Schema, SchemaError};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One pretty-printed JSON object.
    Json,
}

/// A rendered validation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Whether validation passed.
    pub passed: bool,
    /// The text to print on stdout.
    pub rendered: String,
}

impl Report {
    /// Process exit code: 0 when valid, 1 on validation failure.
    pub fn exit_code(&self) -> u8 {
        if self.passed {
            0
        } else {
            1
        }
    }
}

/// Validate `input` into the typed argument set `T`.
///
/// The normalized record is returned for rendering once the typed form has
/// been built from it, so a report never shows a record the runner could
/// not consume.
///
/// # Errors
///
/// Returns [`SchemaError::ValidationFailed`] for non-conforming input and
/// [`SchemaError::Inconsistent`] if `T` cannot be built from the record.
pub fn validate_as<T>(input: &Map<String, Value>) -> Result<Record, SchemaError>
where
    T: Arguments + std::fmt::Debug,
{
    let record = T::schema().validate(input)?;
    let typed = T::from_record(record.clone())?;
    tracing::debug!(?typed, "typed arguments built");
    Ok(record)
}

/// Render the outcome of validating `subject` against `schema`.
///
/// Validation failures become a failing [`Report`]. A
/// [`SchemaError::Inconsistent`] is an internal fault, not a verdict on the
/// input, and is returned as an error.
pub fn report(
    subject: &str,
    schema: &Schema,
    outcome: Result<Record, SchemaError>,
    format: OutputFormat,
) -> Result<Report> {
    let (passed, rendered) = match (outcome, format) {
        (Ok(record), OutputFormat::Text) => {
            let mut out = format!("OK: {subject}");
            for (name, value) in record.iter() {
                out.push_str(&format!("\n  {name} = {value}"));
            }
            (true, out)
        }
        (Ok(record), OutputFormat::Json) => (
            true,
            serde_json::to_string_pretty(&json!({
                "status": "ok",
                "subject": subject,
                "schema": schema.name,
                "record": record,
            }))?,
        ),
        (Err(SchemaError::ValidationFailed { violations, .. }), OutputFormat::Text) => {
            (false, format!("FAIL: {subject}\n{violations}"))
        }
        (Err(SchemaError::ValidationFailed { violations, .. }), OutputFormat::Json) => (
            false,
            serde_json::to_string_pretty(&json!({
                "status": "fail",
                "subject": subject,
                "schema": schema.name,
                "violations": violations,
            }))?,
        ),
        (Err(e @ SchemaError::Inconsistent { .. }), _) => bail!(e),
    };

    tracing::info!(subject, schema = schema.name, passed, "validation complete");
    Ok(Report { passed, rendered })
}
