//! # Schema Validation Engine
//!
//! A [`Schema`] is a static table of `(field name, presence, rule)` entries,
//! a list of cross-field rules, and a policy for undeclared fields. One
//! generic function, [`Schema::validate`], applies any schema to a raw
//! input mapping.
//!
//! ## Procedure
//!
//! 1. Each declared field, in declaration order: a missing or `null`
//!    value is a violation when required and [`FieldValue::Absent`] when
//!    optional; a string is passed to the field rule; any other JSON type
//!    is an invalid format.
//! 2. Each cross-field rule runs against the fields normalized so far. A
//!    field that failed its own rule is not in the record, so relationship
//!    rules see it as absent and do not report it a second time.
//! 3. Undeclared fields, in key order, are either rejected or passed
//!    through untouched.
//!
//! ## Aggregation
//!
//! Validation never stops at the first problem. Every violation from all
//! three steps is collected and returned together, so a caller fixing a
//! configuration sees the full list at once. A record is only returned when
//! there are no violations at all.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use pipedeploy_core::{RuleError, ViolationKind};

use crate::record::{FieldValue, Record};

/// Location used for violations raised by cross-field rules.
pub const RELATIONSHIP_LOCATION: &str = "relationship";

/// A single-field rule: normalize a raw string or reject it.
pub type FieldRule = fn(&str) -> Result<FieldValue, RuleError>;

/// A cross-field check over a partially normalized record.
pub type CrossFieldCheck = fn(&Record) -> Result<(), RuleError>;

/// Whether a declared field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Missing or null is a [`ViolationKind::MissingRequiredField`].
    Required,
    /// Missing or null normalizes to [`FieldValue::Absent`].
    Optional,
}

/// What to do with fields a schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownFieldPolicy {
    /// Each undeclared field is a [`ViolationKind::UnknownField`].
    Reject,
    /// Undeclared fields are copied into the record unchanged.
    Allow,
}

/// One declared field.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    /// Field name as it appears in the input mapping.
    pub name: &'static str,
    /// Whether the field must be present.
    pub presence: Presence,
    /// Normalization rule applied to the raw string.
    pub rule: FieldRule,
}

impl FieldSpec {
    /// A field that must be present.
    pub const fn required(name: &'static str, rule: FieldRule) -> Self {
        Self {
            name,
            presence: Presence::Required,
            rule,
        }
    }

    /// A field that may be missing or null.
    pub const fn optional(name: &'static str, rule: FieldRule) -> Self {
        Self {
            name,
            presence: Presence::Optional,
            rule,
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("presence", &self.presence)
            .finish_non_exhaustive()
    }
}

/// A rule spanning several fields.
#[derive(Clone, Copy)]
pub struct CrossFieldRule {
    /// Short identifier, used in logs.
    pub name: &'static str,
    /// The fields the rule reads.
    pub fields: &'static [&'static str],
    /// The check itself.
    pub check: CrossFieldCheck,
}

impl fmt::Debug for CrossFieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossFieldRule")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// A declarative argument schema.
///
/// Schemas are `static` tables. They hold no state, so one schema can
/// validate any number of inputs from any number of threads.
#[derive(Debug)]
pub struct Schema {
    /// Schema name, used in errors and logs.
    pub name: &'static str,
    /// Declared fields, in validation and output order.
    pub fields: &'static [FieldSpec],
    /// Rules checked after all field rules.
    pub cross_field_rules: &'static [CrossFieldRule],
    /// Handling of undeclared fields.
    pub unknown_fields: UnknownFieldPolicy,
}

impl Schema {
    /// Whether `name` is a declared field.
    pub fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Validate a raw input mapping.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ValidationFailed`] carrying every violation
    /// found when the input does not conform.
    pub fn validate(&self, input: &Map<String, Value>) -> Result<Record, SchemaError> {
        tracing::debug!(schema = self.name, keys = input.len(), "validating arguments");

        let mut record = Record::new(self.name);
        let mut violations = Vec::new();

        for spec in self.fields {
            match input.get(spec.name) {
                None | Some(Value::Null) => match spec.presence {
                    Presence::Required => violations.push(Violation::field(
                        spec.name,
                        ViolationKind::MissingRequiredField,
                        format!("field `{}` is required", spec.name),
                    )),
                    Presence::Optional => record.insert(spec.name, FieldValue::Absent),
                },
                Some(Value::String(raw)) => match (spec.rule)(raw) {
                    Ok(value) => {
                        tracing::trace!(schema = self.name, field = spec.name, "field accepted");
                        record.insert(spec.name, value);
                    }
                    Err(e) => violations.push(Violation::field(spec.name, e.kind(), e.message())),
                },
                Some(other) => violations.push(Violation::field(
                    spec.name,
                    ViolationKind::InvalidFormat,
                    format!(
                        "field `{}` must be a string, got {}",
                        spec.name,
                        json_type_name(other)
                    ),
                )),
            }
        }

        for rule in self.cross_field_rules {
            if let Err(e) = (rule.check)(&record) {
                tracing::trace!(schema = self.name, rule = rule.name, "cross-field rule failed");
                violations.push(Violation::relationship(rule, &e));
            }
        }

        let mut unknown: Vec<(&String, &Value)> =
            input.iter().filter(|(k, _)| !self.declares(k)).collect();
        unknown.sort_by(|a, b| a.0.cmp(b.0));
        for (name, value) in unknown {
            match self.unknown_fields {
                UnknownFieldPolicy::Reject => violations.push(Violation::field(
                    name,
                    ViolationKind::UnknownField,
                    format!("extra field `{name}` is not permitted"),
                )),
                UnknownFieldPolicy::Allow => {
                    record.insert(name.clone(), FieldValue::Passthrough(value.clone()))
                }
            }
        }

        tracing::debug!(
            schema = self.name,
            violations = violations.len(),
            "validation finished"
        );

        if violations.is_empty() {
            Ok(record)
        } else {
            Err(SchemaError::ValidationFailed {
                schema: self.name.to_string(),
                violations: Violations { violations },
            })
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Error during schema validation.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    /// The input did not conform to the schema.
    #[error("validation failed against schema '{schema}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema: String,
        /// Every violation found.
        violations: Violations,
    },

    /// A validated record lacked a field its typed form needs.
    ///
    /// Only reachable if a typed record and its schema table disagree.
    #[error("record from schema '{schema}' has no usable value for '{field}'")]
    Inconsistent {
        /// Schema that produced the record.
        schema: String,
        /// The field that could not be extracted.
        field: String,
    },
}

impl SchemaError {
    /// The violations, if this is a validation failure.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::ValidationFailed { violations, .. } => Some(violations),
            Self::Inconsistent { .. } => None,
        }
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The failing field, or [`RELATIONSHIP_LOCATION`] for cross-field rules.
    pub location: String,
    /// Every field the violation concerns.
    pub fields: Vec<String>,
    /// What went wrong.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    fn field(name: &str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            location: name.to_string(),
            fields: vec![name.to_string()],
            kind,
            message: message.into(),
        }
    }

    fn relationship(rule: &CrossFieldRule, error: &RuleError) -> Self {
        Self {
            location: RELATIONSHIP_LOCATION.to_string(),
            fields: rule.fields.iter().map(|f| f.to_string()).collect(),
            kind: error.kind(),
            message: error.message().to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location == RELATIONSHIP_LOCATION {
            write!(
                f,
                "  {} ({}): {}",
                self.location,
                self.fields.join(", "),
                self.message
            )
        } else {
            write!(f, "  {}: {}", self.location, self.message)
        }
    }
}

/// Collection of validation violations, in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations concerning the named field.
    pub fn for_field<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.fields.iter().any(|f| f == name))
    }

    /// Distinct failing field names, in first-seen order.
    pub fn failing_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.violations.iter().flat_map(|v| v.fields.iter()) {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        names
    }

    /// Whether any violation has the given kind.
    pub fn contains_kind(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
