//! # Normalized Records
//!
//! The output of a successful schema validation: every declared field in
//! declaration order, followed by any passed-through extra fields in key
//! order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use pipedeploy_core::format_date;

/// A single normalized value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A validated string, returned as given.
    Text(String),
    /// A calendar date parsed from `YYYY-MM-DD`.
    Date(NaiveDate),
    /// An optional field that was missing or null.
    Absent,
    /// An undeclared field accepted by an `Allow` schema, untouched.
    Passthrough(Value),
}

impl FieldValue {
    /// The string payload, if this is [`FieldValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The date payload, if this is [`FieldValue::Date`].
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Whether the value is [`FieldValue::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => f.write_str(&format_date(d)),
            Self::Absent => f.write_str("(absent)"),
            Self::Passthrough(v) => write!(f, "{v}"),
        }
    }
}

/// A validated, normalized set of fields produced by one schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: &'static str,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub(crate) fn new(schema: &'static str) -> Self {
        Self {
            schema,
            fields: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    /// Name of the schema that produced this record.
    pub fn schema(&self) -> &'static str {
        self.schema
    }

    /// Number of fields, extras included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// A text field's value, or `None` if absent or not text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// A date field's value, or `None` if absent or not a date.
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).and_then(FieldValue::as_date)
    }

    /// Iterate over `(name, value)` pairs in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Remove and return a field's value.
    pub fn take(&mut self, name: &str) -> Option<FieldValue> {
        let idx = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(idx).1)
    }

    /// Drain the passed-through extra fields into an ordered map.
    pub fn take_extras(&mut self) -> BTreeMap<String, Value> {
        let mut extras = BTreeMap::new();
        self.fields.retain(|(name, value)| match value {
            FieldValue::Passthrough(v) => {
                extras.insert(name.clone(), v.clone());
                false
            }
            _ => true,
        });
        extras
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
