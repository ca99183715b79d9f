//! Filing JSON loader.
//!
//! A filing record is a JSON mapping with at least a `text` field. Records
//! missing the field (or not mappings at all) degrade to summarizing their
//! own serialization rather than failing.

use edgar_core::{AppError, AppResult};
use serde_json::Value;
use std::path::Path;

/// Load a filing JSON file and return its raw text.
pub fn load_filing_text(path: &Path) -> AppResult<String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Pipeline(format!("Failed to read filing {:?}: {}", path, e)))?;

    let value: Value = serde_json::from_str(&raw)
        .map_err(|e| AppError::Pipeline(format!("Failed to parse filing {:?}: {}", path, e)))?;

    Ok(extract_text(&value))
}

/// The `text` field if present and a string; otherwise the serialized
/// document.
pub fn extract_text(value: &Value) -> String {
    match value.get("text") {
        Some(Value::String(s)) => s.clone(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_text_field() {
        let value = json!({"text": "filing body", "form": "10-K"});
        assert_eq!(extract_text(&value), "filing body");
    }

    #[test]
    fn test_fallback_to_serialization() {
        let value = json!({"form": "10-K"});
        assert_eq!(extract_text(&value), r#"{"form":"10-K"}"#);

        let value = json!(["not", "a", "mapping"]);
        assert_eq!(extract_text(&value), r#"["not","a","mapping"]"#);
    }

    #[test]
    fn test_non_string_text_field_falls_back() {
        let value = json!({"text": 42});
        assert_eq!(extract_text(&value), r#"{"text":42}"#);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filing.json");
        std::fs::write(&path, r#"{"text": "hello filing"}"#).unwrap();

        assert_eq!(load_filing_text(&path).unwrap(), "hello filing");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_filing_text(Path::new("/nonexistent/filing.json"));
        assert!(result.is_err());
    }
}
