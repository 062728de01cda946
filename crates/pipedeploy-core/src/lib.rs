//! # pipedeploy-core — Foundational Types for the Deployment Helper
//!
//! This crate is the leaf of the workspace. It defines the error hierarchy
//! and the validated primitives that argument schemas are built from.
//!
//! ## Key Design Principles
//!
//! 1. **Validated newtypes.** [`JsonSchemaPath`] and [`ReleaseVersion`]
//!    can only be constructed from conforming strings. Holding one is proof
//!    that the check ran.
//!
//! 2. **Plain calendar dates.** Run-window bounds are `chrono::NaiveDate`,
//!    parsed from `YYYY-MM-DD` with no time or timezone component.
//!
//! 3. **Rules report reasons, not locations.** Every check returns a
//!    [`RuleError`] carrying a complete message; the schema layer decides
//!    which field it belongs to.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pipedeploy-*` crates.
//! - No `unsafe` code.
//! - No I/O. Everything here is a pure function of its input.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod temporal;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use error::{PipedeployError, RuleError, ViolationKind};
pub use path::{file_extension, JsonSchemaPath, JSON_EXTENSION};
pub use temporal::{check_window, format_date, parse_date, DATE_FORMAT, DATE_PATTERN};
pub use version::{is_release_version, ReleaseVersion};
