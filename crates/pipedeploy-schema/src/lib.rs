//! # pipedeploy-schema — Argument Schemas & Validation Engine
//!
//! Decides whether a set of deployment arguments is well-formed before it is
//! handed to the pipeline runner.
//!
//! ## Engine (`engine`)
//!
//! A [`Schema`] is a static table of declared fields (each with a presence
//! flag and a [`FieldRule`]), a list of [`CrossFieldRule`]s, and an
//! [`UnknownFieldPolicy`]. [`Schema::validate`] applies it to a raw
//! `serde_json` mapping and returns a normalized [`Record`] or every
//! [`Violation`] found.
//!
//! ## Rules (`rules`)
//!
//! Plain text, `YYYY-MM-DD` dates, `.json` schema paths, release versions,
//! and the run-window ordering rule. Rules are plain `fn` pointers and are
//! shared freely between schemas.
//!
//! ## Argument sets (`arguments`)
//!
//! The four deployment schemas and their typed records, reachable through
//! the [`Arguments`] trait. The typed records are what callers hand to the
//! pipeline runner; `pipedeploy-cli` builds one for every accepted input.
//!
//! ```
//! use pipedeploy_schema::{Arguments, CommandlineArguments};
//! use serde_json::json;
//!
//! let input = json!({
//!     "module": "daily_ingest",
//!     "start_date": "2022-01-01",
//!     "end_date": "2022-01-31",
//! });
//! let args = CommandlineArguments::validate(input.as_object().unwrap()).unwrap();
//! assert_eq!(args.module, "daily_ingest");
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `pipedeploy-core` internally.
//! - No I/O: loading files or parsing flags is the caller's job.
//! - Validation is a trust boundary. Malformed input is rejected with the
//!   field, the kind of violation, and a reason; it is never corrected or
//!   defaulted.

pub mod arguments;
pub mod engine;
pub mod record;
pub mod rules;

pub use arguments::{
    Arguments, CommandlineArguments, OptionalDateCommandlineArguments, PipelineConfigArguments,
    TransformationConfigArguments, COMMANDLINE, OPTIONAL_DATE_COMMANDLINE, PIPELINE_CONFIG,
    TRANSFORMATION_CONFIG,
};
pub use engine::{
    CrossFieldCheck, CrossFieldRule, FieldRule, FieldSpec, Presence, Schema, SchemaError,
    UnknownFieldPolicy, Violation, Violations, RELATIONSHIP_LOCATION,
};
pub use record::{FieldValue, Record};
