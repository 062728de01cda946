//! # Deployment Argument Schemas
//!
//! The four argument sets the deployment helper accepts, each declared as a
//! static [`Schema`] table and paired with a typed record.
//!
//! | Schema | Fields | Extras |
//! |---|---|---|
//! | [`COMMANDLINE`] | `module`, `start_date`, `end_date` + window order | rejected |
//! | [`PIPELINE_CONFIG`] | `data_processor_name`, `main_transformation_name`, `output_data_path`, `output_schema_path` | passed through |
//! | [`TRANSFORMATION_CONFIG`] | `input_schema_path`, `ref_schema_path` | passed through |
//! | [`OPTIONAL_DATE_COMMANDLINE`] | `module`, optional `start_date`/`end_date` + window order | passed through |
//!
//! The optional-date variant serves streaming pipelines, which run without
//! a date window but must still get an ordered one when a window is given.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use pipedeploy_core::JsonSchemaPath;

use crate::engine::{FieldSpec, Schema, SchemaError, UnknownFieldPolicy};
use crate::record::{FieldValue, Record};
use crate::rules::{calendar_date, json_schema_path, plain_text, RUN_WINDOW_ORDER};

/// Batch pipeline command-line arguments.
pub static COMMANDLINE: Schema = Schema {
    name: "commandline",
    fields: &[
        FieldSpec::required("module", plain_text),
        FieldSpec::required("start_date", calendar_date),
        FieldSpec::required("end_date", calendar_date),
    ],
    cross_field_rules: &[RUN_WINDOW_ORDER],
    unknown_fields: UnknownFieldPolicy::Reject,
};

/// Pipeline configuration file arguments.
pub static PIPELINE_CONFIG: Schema = Schema {
    name: "pipeline_config",
    fields: &[
        FieldSpec::required("data_processor_name", plain_text),
        FieldSpec::required("main_transformation_name", plain_text),
        FieldSpec::required("output_data_path", plain_text),
        FieldSpec::required("output_schema_path", json_schema_path),
    ],
    cross_field_rules: &[],
    unknown_fields: UnknownFieldPolicy::Allow,
};

/// Transformation configuration (data source) arguments.
pub static TRANSFORMATION_CONFIG: Schema = Schema {
    name: "transformation_config",
    fields: &[
        FieldSpec::required("input_schema_path", json_schema_path),
        FieldSpec::required("ref_schema_path", json_schema_path),
    ],
    cross_field_rules: &[],
    unknown_fields: UnknownFieldPolicy::Allow,
};

/// Streaming pipeline command-line arguments; the date window is optional.
pub static OPTIONAL_DATE_COMMANDLINE: Schema = Schema {
    name: "optional_date_commandline",
    fields: &[
        FieldSpec::required("module", plain_text),
        FieldSpec::optional("start_date", calendar_date),
        FieldSpec::optional("end_date", calendar_date),
    ],
    cross_field_rules: &[RUN_WINDOW_ORDER],
    unknown_fields: UnknownFieldPolicy::Allow,
};

/// A typed view over a schema's normalized record.
pub trait Arguments: Sized {
    /// The schema this type is validated against.
    fn schema() -> &'static Schema;

    /// Build the typed value from a record produced by [`Self::schema`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Inconsistent`] if the record lacks a field
    /// the typed form needs.
    fn from_record(record: Record) -> Result<Self, SchemaError>;

    /// Validate a raw input mapping into the typed form.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ValidationFailed`] listing every violation.
    fn validate(input: &Map<String, Value>) -> Result<Self, SchemaError> {
        Self::from_record(Self::schema().validate(input)?)
    }
}

fn inconsistent(record: &Record, field: &str) -> SchemaError {
    SchemaError::Inconsistent {
        schema: record.schema().to_string(),
        field: field.to_string(),
    }
}

fn take_text(record: &mut Record, field: &str) -> Result<String, SchemaError> {
    match record.take(field) {
        Some(FieldValue::Text(s)) => Ok(s),
        _ => Err(inconsistent(record, field)),
    }
}

fn take_date(record: &mut Record, field: &str) -> Result<NaiveDate, SchemaError> {
    match record.take(field) {
        Some(FieldValue::Date(d)) => Ok(d),
        _ => Err(inconsistent(record, field)),
    }
}

fn take_optional_date(record: &mut Record, field: &str) -> Result<Option<NaiveDate>, SchemaError> {
    match record.take(field) {
        Some(FieldValue::Date(d)) => Ok(Some(d)),
        Some(FieldValue::Absent) => Ok(None),
        _ => Err(inconsistent(record, field)),
    }
}

fn take_schema_path(record: &mut Record, field: &str) -> Result<JsonSchemaPath, SchemaError> {
    let raw = take_text(record, field)?;
    JsonSchemaPath::new(raw).map_err(|_| inconsistent(record, field))
}

/// Validated batch pipeline command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandlineArguments {
    /// Pipeline module to run.
    pub module: String,
    /// First day of the run window.
    pub start_date: NaiveDate,
    /// Last day of the run window (inclusive).
    pub end_date: NaiveDate,
}

impl Arguments for CommandlineArguments {
    fn schema() -> &'static Schema {
        &COMMANDLINE
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            module: take_text(&mut record, "module")?,
            start_date: take_date(&mut record, "start_date")?,
            end_date: take_date(&mut record, "end_date")?,
        })
    }
}

/// Validated pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineConfigArguments {
    /// Name of the data processor that runs the pipeline.
    pub data_processor_name: String,
    /// Entry-point transformation.
    pub main_transformation_name: String,
    /// Where output data is written.
    pub output_data_path: String,
    /// JSON schema describing the output.
    pub output_schema_path: JsonSchemaPath,
    /// Every other configuration key, untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Arguments for PipelineConfigArguments {
    fn schema() -> &'static Schema {
        &PIPELINE_CONFIG
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        let extra = record.take_extras();
        Ok(Self {
            data_processor_name: take_text(&mut record, "data_processor_name")?,
            main_transformation_name: take_text(&mut record, "main_transformation_name")?,
            output_data_path: take_text(&mut record, "output_data_path")?,
            output_schema_path: take_schema_path(&mut record, "output_schema_path")?,
            extra,
        })
    }
}

/// Validated transformation (data source) configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformationConfigArguments {
    /// JSON schema of the incoming data.
    pub input_schema_path: JsonSchemaPath,
    /// JSON schema of the reference data.
    pub ref_schema_path: JsonSchemaPath,
    /// Every other configuration key, untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Arguments for TransformationConfigArguments {
    fn schema() -> &'static Schema {
        &TRANSFORMATION_CONFIG
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        let extra = record.take_extras();
        Ok(Self {
            input_schema_path: take_schema_path(&mut record, "input_schema_path")?,
            ref_schema_path: take_schema_path(&mut record, "ref_schema_path")?,
            extra,
        })
    }
}

/// Validated streaming pipeline command-line arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionalDateCommandlineArguments {
    /// Pipeline module to run.
    pub module: String,
    /// First day of the run window, if any.
    pub start_date: Option<NaiveDate>,
    /// Last day of the run window, if any.
    pub end_date: Option<NaiveDate>,
    /// Every other argument, untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Arguments for OptionalDateCommandlineArguments {
    fn schema() -> &'static Schema {
        &OPTIONAL_DATE_COMMANDLINE
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        let extra = record.take_extras();
        Ok(Self {
            module: take_text(&mut record, "module")?,
            start_date: take_optional_date(&mut record, "start_date")?,
            end_date: take_optional_date(&mut record, "end_date")?,
            extra,
        })
    }
}
