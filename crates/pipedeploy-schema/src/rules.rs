//! # Field and Cross-Field Rules
//!
//! The building blocks schemas are declared from. Field rules match
//! [`FieldRule`](crate::engine::FieldRule) and cross-field rules match
//! [`CrossFieldCheck`](crate::engine::CrossFieldCheck), so each one can be
//! attached to any number of fields in any number of schemas.

use pipedeploy_core::{check_window, parse_date, JsonSchemaPath, ReleaseVersion, RuleError};

use crate::engine::CrossFieldRule;
use crate::record::{FieldValue, Record};

/// Accept any string unchanged.
pub fn plain_text(raw: &str) -> Result<FieldValue, RuleError> {
    Ok(FieldValue::Text(raw.to_string()))
}

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn calendar_date(raw: &str) -> Result<FieldValue, RuleError> {
    parse_date(raw).map(FieldValue::Date)
}

/// Require a `.json` extension; the path is kept as given.
pub fn json_schema_path(raw: &str) -> Result<FieldValue, RuleError> {
    JsonSchemaPath::new(raw).map(|p| FieldValue::Text(p.into()))
}

/// Require a MAJOR.MINOR.PATCH release version; the string is kept as given.
pub fn release_version(raw: &str) -> Result<FieldValue, RuleError> {
    ReleaseVersion::parse(raw).map(|v| FieldValue::Text(v.into()))
}

/// `start_date` must not be after `end_date` when both are present.
pub fn start_date_not_after_end_date(record: &Record) -> Result<(), RuleError> {
    check_window(
        record.date("start_date").as_ref(),
        record.date("end_date").as_ref(),
    )
}

/// Run-window ordering between `start_date` and `end_date`.
pub const RUN_WINDOW_ORDER: CrossFieldRule = CrossFieldRule {
    name: "run_window_order",
    fields: &["start_date", "end_date"],
    check: start_date_not_after_end_date,
};
