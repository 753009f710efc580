//! Decoding raw error records from the fetcher's JSON output.

use crate::domain::{ConsolidatorError, RawErrorRecord};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Parse a JSON array of raw error records.
///
/// Fails fast when the document is not an array or an element is not
/// record-shaped, instead of yielding an empty result.
pub fn parse_records(json: &str) -> Result<Vec<RawErrorRecord>, ConsolidatorError> {
    let document: Value = serde_json::from_str(json)?;
    records_from_value(document)
}

pub fn records_from_value(document: Value) -> Result<Vec<RawErrorRecord>, ConsolidatorError> {
    let elements = match document {
        Value::Array(elements) => elements,
        other => {
            return Err(ConsolidatorError::NotAnArray {
                found: json_type_name(&other),
            });
        }
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            if !element.is_object() {
                return Err(ConsolidatorError::InvalidRecord {
                    index,
                    source: serde::de::Error::custom(format!(
                        "expected an object, found {}",
                        json_type_name(&element)
                    )),
                });
            }
            serde_json::from_value(element)
                .map_err(|source| ConsolidatorError::InvalidRecord { index, source })
        })
        .collect()
}

/// Read and parse the records file written by the log fetcher.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RawErrorRecord>, ConsolidatorError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConsolidatorError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(&content)?;
    debug!(path = %path.display(), records = records.len(), "Loaded error records");
    Ok(records)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let records = parse_records(
            r#"[
                {"service": "svc-a", "message": "boom", "timestamp": "2024-01-01T10:00:00", "revision": "svc-a-0001"},
                {"message": "no service"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].revision(), Some("svc-a-0001"));
        assert_eq!(records[1].service, "unknown");
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_top_level_object_is_rejected() {
        let err = parse_records(r#"{"service": "svc"}"#).unwrap_err();
        assert!(matches!(err, ConsolidatorError::NotAnArray { found: "an object" }));
    }

    #[test]
    fn test_non_object_element_reports_index() {
        let err = parse_records(r#"[{"message": "ok"}, "oops"]"#).unwrap_err();

        assert!(matches!(err, ConsolidatorError::InvalidRecord { index: 1, .. }));
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_wrong_field_type_reports_index() {
        let err = parse_records(r#"[{"message": 42}]"#).unwrap_err();
        assert!(matches!(err, ConsolidatorError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_records("[{").unwrap_err();
        assert!(matches!(err, ConsolidatorError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_records("/nonexistent/errors.json").unwrap_err();
        assert!(matches!(err, ConsolidatorError::Io { .. }));
    }
}
