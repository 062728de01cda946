//! # Configuration Document Loading
//!
//! Reads pipeline and transformation configuration files into the raw
//! `serde_json` mapping the schemas validate. The format is chosen by file
//! extension: `.yaml`/`.yml` for YAML, anything else as JSON.

use std::path::Path;

use serde_json::{Map, Value};

use pipedeploy_core::PipedeployError;

/// Load a configuration document whose top level must be a mapping.
///
/// # Errors
///
/// Returns [`PipedeployError::Io`] if the file cannot be read, a parse
/// error if it is not valid JSON/YAML, and [`PipedeployError::Document`] if
/// the top-level value is not a mapping or the YAML cannot be expressed as
/// JSON.
pub fn load_mapping(path: &Path) -> Result<Map<String, Value>, PipedeployError> {
    match load_document(path)? {
        Value::Object(map) => Ok(map),
        other => Err(PipedeployError::Document {
            path: path.display().to_string(),
            reason: format!(
                "top-level value must be a mapping, got {}",
                match other {
                    Value::Null => "null",
                    Value::Bool(_) => "a boolean",
                    Value::Number(_) => "a number",
                    Value::String(_) => "a string",
                    Value::Array(_) => "a sequence",
                    Value::Object(_) => "a mapping",
                }
            ),
        }),
    }
}

/// Load a JSON or YAML document as a JSON value.
pub fn load_document(path: &Path) -> Result<Value, PipedeployError> {
    let content = std::fs::read_to_string(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    tracing::debug!(path = %path.display(), ext, "loading configuration document");

    match ext {
        "yaml" | "yml" => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;
            yaml_to_json_value(&yaml).map_err(|reason| PipedeployError::Document {
                path: path.display().to_string(),
                reason,
            })
        }
        _ => Ok(serde_json::from_str(&content)?),
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Configuration files must stay within the JSON-compatible subset of YAML:
/// tagged values (`!secret abc`) and non-finite floats (`.nan`) are errors.
/// Scalar map keys are stringified the way they are written (`2022: x`
/// becomes the key `"2022"`).
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("non-finite number {f} has no JSON form"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => return Err("map keys must be strings, numbers or booleans".to_string()),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => Err(format!(
            "tagged value `{}` is not supported in configuration files",
            tagged.tag
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_mapping() {
        let file = write_temp(".json", r#"{"input_schema_path": "a.json", "n": 3}"#);
        let map = load_mapping(file.path()).unwrap();
        assert_eq!(map["input_schema_path"], "a.json");
        assert_eq!(map["n"], 3);
    }

    #[test]
    fn test_load_yaml_mapping() {
        let file = write_temp(
            ".yaml",
            "data_processor_name: spark\n\
             retries: 3\n\
             ratio: 0.5\n\
             enabled: true\n\
             sources:\n  - a\n  - b\n",
        );
        let map = load_mapping(file.path()).unwrap();
        assert_eq!(map["data_processor_name"], "spark");
        assert_eq!(map["retries"], 3);
        assert_eq!(map["ratio"], 0.5);
        assert_eq!(map["enabled"], true);
        assert_eq!(map["sources"][1], "b");
    }

    #[test]
    fn test_yaml_null_and_numeric_keys() {
        let file = write_temp(".yml", "start_date: ~\n2022: year\n");
        let map = load_mapping(file.path()).unwrap();
        assert_eq!(map["start_date"], Value::Null);
        assert_eq!(map["2022"], "year");
    }

    #[test]
    fn test_yaml_tags_rejected() {
        let file = write_temp(".yaml", "output_schema_path: !include schemas/out.json\n");
        let err = load_mapping(file.path()).unwrap_err();
        assert!(matches!(err, PipedeployError::Document { .. }));
        assert!(err.to_string().contains("!include"), "{err}");
    }

    #[test]
    fn test_yaml_nested_tag_rejected() {
        let file = write_temp(".yml", "sources:\n  - !secret token\n");
        assert!(matches!(
            load_mapping(file.path()).unwrap_err(),
            PipedeployError::Document { .. }
        ));
    }

    #[test]
    fn test_yaml_non_finite_number_rejected() {
        let file = write_temp(".yaml", "ratio: .nan\n");
        let err = load_mapping(file.path()).unwrap_err();
        assert!(err.to_string().contains("no JSON form"), "{err}");
    }

    #[test]
    fn test_yaml_sequence_key_rejected() {
        let file = write_temp(".yaml", "? [a, b]\n: value\n");
        let err = load_mapping(file.path()).unwrap_err();
        assert!(err.to_string().contains("map keys"), "{err}");
    }

    #[test]
    fn test_non_mapping_rejected() {
        let file = write_temp(".json", "[1, 2, 3]");
        let err = load_mapping(file.path()).unwrap_err();
        assert!(matches!(err, PipedeployError::Document { .. }));
        assert!(err.to_string().contains("a sequence"));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let file = write_temp(".json", "{not json");
        assert!(matches!(
            load_mapping(file.path()).unwrap_err(),
            PipedeployError::Json(_)
        ));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let file = write_temp(".yaml", "key: [unclosed");
        assert!(matches!(
            load_mapping(file.path()).unwrap_err(),
            PipedeployError::Yaml(_)
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_mapping(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PipedeployError::Io(_)));
    }
}
