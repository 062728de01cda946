//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the deployment helper. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A single rule reports a [`RuleError`]: the reason only, with no field
//!   name. The schema engine attaches the field and lifts it into a
//!   violation.
//! - Every rejection is final. The input is malformed and retrying with the
//!   same input cannot succeed, so no variant carries retry hints.
//! - Messages always quote the offending raw value and the expected form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for the deployment helper's document handling.
#[derive(Error, Debug)]
pub enum PipedeployError {
    /// A configuration document could not be interpreted.
    #[error("document error for '{path}': {reason}")]
    Document {
        /// Path of the offending document.
        path: String,
        /// Why it could not be used.
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure reported by a single field or cross-field rule.
///
/// The message is complete and human-readable; it names the offending
/// value(s) and the expected form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A single value does not conform to its declared format.
    #[error("{0}")]
    InvalidFormat(String),

    /// A relationship between two or more values is violated.
    #[error("{0}")]
    InvalidRelationship(String),
}

impl RuleError {
    /// The violation kind this rule failure maps to.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::InvalidFormat(_) => ViolationKind::InvalidFormat,
            Self::InvalidRelationship(_) => ViolationKind::InvalidRelationship,
        }
    }

    /// The human-readable reason.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidFormat(m) | Self::InvalidRelationship(m) => m,
        }
    }
}

/// Classification of a schema violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent (or explicitly null).
    MissingRequiredField,
    /// A field value does not match its rule.
    InvalidFormat,
    /// A cross-field rule rejected the combination of values.
    InvalidRelationship,
    /// A field not declared by a schema that rejects extras.
    UnknownField,
}

impl ViolationKind {
    /// Stable identifier, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::InvalidFormat => "invalid_format",
            Self::InvalidRelationship => "invalid_relationship",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
