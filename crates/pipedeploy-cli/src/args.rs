//! # Args Subcommand
//!
//! Validates the command-line arguments a pipeline run is launched with.
//! Batch runs use the strict commandline schema (dates required, nothing
//! else allowed); `--optional-dates` switches to the streaming variant,
//! where the window is optional and extra `--set` arguments pass through.

use anyhow::{bail, Result};
use clap::Args;
use serde_json::{Map, Value};

use pipedeploy_schema::{
    CommandlineArguments, OptionalDateCommandlineArguments, Record, Schema, SchemaError,
    COMMANDLINE, OPTIONAL_DATE_COMMANDLINE,
};

use crate::output::{report, validate_as, OutputFormat, Report};

/// Arguments for the `pipedeploy args` subcommand.
#[derive(Args, Debug, Default)]
pub struct CommandlineArgs {
    /// Pipeline module to run.
    #[arg(long)]
    pub module: Option<String>,

    /// First day of the run window.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start_date: Option<String>,

    /// Last day of the run window (inclusive).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end_date: Option<String>,

    /// Validate as a streaming run: the date window becomes optional.
    #[arg(long)]
    pub optional_dates: bool,

    /// Additional argument to pass along. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub extra: Vec<(String, String)>,
}

impl CommandlineArgs {
    /// The schema these arguments are checked against.
    pub fn schema(&self) -> &'static Schema {
        if self.optional_dates {
            &OPTIONAL_DATE_COMMANDLINE
        } else {
            &COMMANDLINE
        }
    }

    /// Validate `input` into the typed argument set for this run mode.
    pub fn validate(&self, input: &Map<String, Value>) -> Result<Record, SchemaError> {
        if self.optional_dates {
            validate_as::<OptionalDateCommandlineArguments>(input)
        } else {
            validate_as::<CommandlineArguments>(input)
        }
    }

    /// Build the raw input mapping. Flags left unset are omitted.
    ///
    /// # Errors
    ///
    /// Fails if a `--set` key repeats a flag or another `--set` key.
    pub fn to_input(&self) -> Result<Map<String, Value>> {
        let mut input = Map::new();
        for (name, value) in [
            ("module", &self.module),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
        ] {
            if let Some(value) = value {
                input.insert(name.to_string(), Value::String(value.clone()));
            }
        }
        for (key, value) in &self.extra {
            if input.contains_key(key) {
                bail!("argument `{key}` given more than once");
            }
            input.insert(key.clone(), Value::String(value.clone()));
        }
        Ok(input)
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

/// Validate command-line arguments and render the report.
pub fn check_args(args: &CommandlineArgs, format: OutputFormat) -> Result<Report> {
    let input = args.to_input()?;
    report(
        "command-line arguments",
        args.schema(),
        args.validate(&input),
        format,
    )
}

/// Execute the args subcommand.
///
/// Returns exit code: 0 when valid, 1 on validation failure.
pub fn run_args(args: &CommandlineArgs, format: OutputFormat) -> Result<u8> {
    let report = check_args(args, format)?;
    println!("{}", report.rendered);
    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(start: &str, end: &str) -> CommandlineArgs {
        CommandlineArgs {
            module: Some("daily_ingest".to_string()),
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("env=prod").unwrap(),
            ("env".to_string(), "prod".to_string())
        );
        assert_eq!(
            parse_key_value("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_valid_batch_window() {
        let r = check_args(&batch("2022-01-01", "2022-01-31"), OutputFormat::Text).unwrap();
        assert!(r.passed);
    }

    #[test]
    fn test_reversed_batch_window() {
        let r = check_args(&batch("2022-01-05", "2022-01-01"), OutputFormat::Text).unwrap();
        assert!(!r.passed);
        assert!(r.rendered.contains("relationship (start_date, end_date)"));
    }

    #[test]
    fn test_batch_rejects_extra_arguments() {
        let mut args = batch("2022-01-01", "2022-01-02");
        args.extra.push(("env".to_string(), "prod".to_string()));
        let r = check_args(&args, OutputFormat::Text).unwrap();
        assert!(!r.passed);
        assert!(r.rendered.contains("extra field `env` is not permitted"));
    }

    #[test]
    fn test_streaming_without_window() {
        let args = CommandlineArgs {
            module: Some("stream_events".to_string()),
            optional_dates: true,
            extra: vec![("env".to_string(), "prod".to_string())],
            ..Default::default()
        };
        let r = check_args(&args, OutputFormat::Text).unwrap();
        assert!(r.passed, "{}", r.rendered);
        assert!(r.rendered.contains("start_date = (absent)"));
        assert!(r.rendered.contains("env = \"prod\""));
    }

    #[test]
    fn test_missing_module_reported_by_schema() {
        let args = CommandlineArgs {
            optional_dates: true,
            ..Default::default()
        };
        let r = check_args(&args, OutputFormat::Text).unwrap();
        assert!(!r.passed);
        assert!(r.rendered.contains("field `module` is required"));
    }

    #[test]
    fn test_duplicate_set_key_is_an_error() {
        let mut args = batch("2022-01-01", "2022-01-02");
        args.extra.push(("module".to_string(), "other".to_string()));
        assert!(check_args(&args, OutputFormat::Text).is_err());
    }
}
