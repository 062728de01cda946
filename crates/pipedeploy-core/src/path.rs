//! # Schema Path Newtype
//!
//! Pipeline and transformation configurations point at JSON schema files
//! (`output_schema_path`, `input_schema_path`, `ref_schema_path`). The
//! deployment helper only ever hands these to a JSON schema loader, so any
//! other extension is a configuration mistake.
//!
//! ## Extension semantics
//!
//! The extension is taken from the final `/`-separated segment: everything
//! from its last `.` onwards, where leading dots of the segment do not
//! count (`.json` on its own is a hidden file with no extension). The
//! comparison is case-sensitive and only the last dot matters, so
//! `schema.v2.json` passes and `schema.JSON` does not.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// The only extension accepted for schema paths.
pub const JSON_EXTENSION: &str = ".json";

/// A path string that names a `.json` file.
///
/// The path is stored exactly as given; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonSchemaPath(String);

impl JsonSchemaPath {
    /// Validate and wrap a schema path.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidFormat`] when the extension is not
    /// exactly `.json`.
    pub fn new(path: impl Into<String>) -> Result<Self, RuleError> {
        let path = path.into();
        if file_extension(&path) != JSON_EXTENSION {
            return Err(RuleError::InvalidFormat(format!(
                "incorrect file format for the path `{path}`, the file should be `{JSON_EXTENSION}`"
            )));
        }
        Ok(Self(path))
    }

    /// The path as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for JsonSchemaPath {
    type Error = RuleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JsonSchemaPath> for String {
    fn from(path: JsonSchemaPath) -> Self {
        path.0
    }
}

impl std::fmt::Display for JsonSchemaPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extension of the final path segment, including the leading dot.
///
/// Returns `""` when the segment has no extension.
pub fn file_extension(path: &str) -> &str {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let stem_start = segment.len() - segment.trim_start_matches('.').len();
    match segment[stem_start..].rfind('.') {
        Some(dot) => &segment[stem_start + dot..],
        None => "",
    }
}
