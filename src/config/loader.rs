use anyhow::{Context, Result};
use schemars::{Schema, schema_for};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

use super::error::{ConfigError, FieldProblem, json_type_name};
use super::models::{
    AnalysisConfig, CONTROL_COLLECTION_KEY, MARKER_NAME_KEY, TREATED_COLLECTION_KEY,
};

/// Load the analysis input from a file path. Alias of [`load_from_path`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<AnalysisConfig, ConfigError> {
    load_from_path(path)
}

/// Load the analysis input from a string slice.
pub fn load_from_str(s: &str) -> Result<AnalysisConfig, ConfigError> {
    let value: Value =
        serde_json::from_str(s).map_err(|source| ConfigError::MalformedDocument {
            origin: "string".to_string(),
            source,
        })?;
    load_from_value(&value)
}

/// Load the analysis input from any reader (e.g., a file).
pub fn load_from_reader<R: Read>(reader: R) -> Result<AnalysisConfig, ConfigError> {
    let value: Value =
        serde_json::from_reader(reader).map_err(|source| ConfigError::MalformedDocument {
            origin: "reader".to_string(),
            source,
        })?;
    load_from_value(&value)
}

/// Load the analysis input from a file path.
///
/// The file handle only lives for the duration of the parse.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<AnalysisConfig, ConfigError> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).map_err(|source| ConfigError::FileAccess {
        path: path_ref.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            // Read failures mid-stream are access problems, not syntax problems.
            ConfigError::FileAccess {
                path: path_ref.to_path_buf(),
                source: source.into(),
            }
        } else {
            ConfigError::MalformedDocument {
                origin: path_ref.display().to_string(),
                source,
            }
        }
    })?;
    let cfg = load_from_value(&value)?;
    debug!(
        path = %path_ref.display(),
        has_marker = cfg.has_marker(),
        "Loaded analysis input"
    );
    Ok(cfg)
}

/// Extract and validate the fields of an already-parsed document.
pub fn load_from_value(value: &Value) -> Result<AnalysisConfig, ConfigError> {
    let obj = value.as_object().ok_or_else(|| ConfigError::NotAnObject {
        found: json_type_name(value),
    })?;

    let control = required_str(obj, CONTROL_COLLECTION_KEY)?;
    let treated = required_str(obj, TREATED_COLLECTION_KEY)?;
    let marker = optional_str(obj, MARKER_NAME_KEY);

    AnalysisConfig::new(control, treated, marker)
}

fn required_str(obj: &Map<String, Value>, field: &'static str) -> Result<String, ConfigError> {
    match obj.get(field) {
        None => Err(ConfigError::MissingField {
            field,
            problem: FieldProblem::Absent,
        }),
        Some(Value::String(s)) if s.is_empty() => Err(ConfigError::MissingField {
            field,
            problem: FieldProblem::Empty,
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ConfigError::MissingField {
            field,
            problem: FieldProblem::WrongType {
                found: json_type_name(other),
            },
        }),
    }
}

fn optional_str(obj: &Map<String, Value>, field: &'static str) -> Option<String> {
    match obj.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::String(_)) => {
            trace!(field, "Empty optional field treated as absent");
            None
        }
        Some(other) => {
            warn!(
                field,
                found = json_type_name(other),
                "Ignoring non-string optional field"
            );
            None
        }
        None => None,
    }
}

/// Generate the JSON Schema describing the input document.
pub fn generate_schema() -> Schema {
    schema_for!(AnalysisConfig)
}

/// Write the input JSON Schema to any writer (pretty-printed).
pub fn write_schema_to_writer<W: Write>(mut writer: W) -> Result<()> {
    let schema = generate_schema();
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    writer
        .write_all(json.as_bytes())
        .context("Failed to write schema to writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorKind;
    use serde_json::json;
    use std::io::Cursor;

    fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_required_fields_only() {
        let cfg =
            load_from_str(r#"{"controlCollection":"ctrlA","treatedCollection":"treatB"}"#).unwrap();
        assert_eq!(cfg.control_collection(), "ctrlA");
        assert_eq!(cfg.treated_collection(), "treatB");
        assert!(!cfg.has_marker());
    }

    #[test]
    fn test_with_marker() {
        let cfg = load_from_str(
            r#"{"controlCollection":"ctrlA","treatedCollection":"treatB","markerName":"CD45"}"#,
        )
        .unwrap();
        assert!(cfg.has_marker());
        assert_eq!(cfg.marker_name(), Some("CD45"));
    }

    #[test]
    fn test_empty_marker_disabled() {
        let cfg = load_from_str(
            r#"{"controlCollection":"ctrlA","treatedCollection":"treatB","markerName":""}"#,
        )
        .unwrap();
        assert!(!cfg.has_marker());
        assert_eq!(cfg.marker_name(), None);
    }

    #[test]
    fn test_non_string_marker_ignored() {
        let cfg = load_from_value(&json!({
            "controlCollection": "ctrlA",
            "treatedCollection": "treatB",
            "markerName": 45
        }))
        .unwrap();
        assert!(!cfg.has_marker());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let cfg = load_from_value(&json!({
            "controlCollection": "ctrlA",
            "treatedCollection": "treatB",
            "comment": { "nested": true }
        }))
        .unwrap();
        assert_eq!(cfg.control_collection(), "ctrlA");
    }

    #[test]
    fn test_missing_control_collection() {
        let err = load_from_str(r#"{"treatedCollection":"treatB"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert!(matches!(
            err,
            ConfigError::MissingField {
                field: CONTROL_COLLECTION_KEY,
                problem: FieldProblem::Absent
            }
        ));
    }

    #[test]
    fn test_control_checked_before_treated() {
        let err = load_from_str("{}").unwrap_err();
        assert_eq!(err.field(), Some(CONTROL_COLLECTION_KEY));
    }

    #[test]
    fn test_wrong_typed_required_fields() {
        let err = load_from_value(&json!({
            "controlCollection": 12,
            "treatedCollection": "treatB"
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                field: CONTROL_COLLECTION_KEY,
                problem: FieldProblem::WrongType { found: "number" }
            }
        ));

        let err = load_from_value(&json!({
            "controlCollection": "ctrlA",
            "treatedCollection": { "name": "treatB" }
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                field: TREATED_COLLECTION_KEY,
                problem: FieldProblem::WrongType { found: "object" }
            }
        ));
    }

    #[test]
    fn test_empty_required_field() {
        let err = load_from_str(r#"{"controlCollection":"ctrlA","treatedCollection":""}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                field: TREATED_COLLECTION_KEY,
                problem: FieldProblem::Empty
            }
        ));
    }

    #[test]
    fn test_syntax_error_is_malformed() {
        let err = load_from_str(r#"{"controlCollection": "ctrlA""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);

        let err = load_from_reader(Cursor::new("not json at all")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_scalar_and_array_documents_are_malformed() {
        for doc in [r#""ctrlA""#, "42", "null", r#"["ctrlA","treatB"]"#] {
            let err = load_from_str(doc).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedDocument, "doc: {doc}");
            assert!(matches!(err, ConfigError::NotAnObject { .. }));
        }
    }

    #[test]
    fn test_missing_file_is_file_access() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("does-not-exist.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileAccess);
        assert!(err.to_string().starts_with("Cannot open input file"));
    }

    #[test]
    fn test_directory_path_is_not_a_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path()).unwrap_err();
        // Platform dependent: open or read fails.
        assert!(matches!(
            err.kind(),
            ErrorKind::FileAccess | ErrorKind::MalformedDocument
        ));
    }

    #[test]
    fn test_load_from_file_with_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(
            &dir,
            "input.json",
            r#"{
                "controlCollection": "clone_T_minus",
                "treatedCollection": "clone_T_plus",
                "markerName": "CD45"
            }"#,
        );
        let cfg = load(&path).unwrap();
        assert_eq!(cfg.control_collection(), "clone_T_minus");
        assert_eq!(cfg.treated_collection(), "clone_T_plus");
        assert_eq!(cfg.marker_name(), Some("CD45"));
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "broken.json", "{ controlCollection: ctrlA }");
        let err = load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(
            &dir,
            "input.json",
            r#"{"controlCollection":"ctrlA","treatedCollection":"treatB","markerName":"CD45"}"#,
        );
        assert_eq!(load(&path).unwrap(), load(&path).unwrap());
    }

    #[test]
    fn test_schema_lists_required_fields() {
        let schema = serde_json::to_value(generate_schema()).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!(CONTROL_COLLECTION_KEY)));
        assert!(required.contains(&json!(TREATED_COLLECTION_KEY)));
        assert!(!required.contains(&json!(MARKER_NAME_KEY)));
        assert!(schema["properties"][MARKER_NAME_KEY].is_object());
    }

    #[test]
    fn test_write_schema_to_writer() {
        let mut buf = Vec::new();
        write_schema_to_writer(&mut buf).unwrap();
        let parsed: Value = serde_json::from_slice(&buf).unwrap();
        assert!(parsed["properties"][CONTROL_COLLECTION_KEY].is_object());
    }
}
