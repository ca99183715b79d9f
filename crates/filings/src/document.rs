//! Stored filing documents and their JSON representation.

use chrono::NaiveDate;
use edgar_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::text::html_to_text;

/// A downloaded filing document tracked by a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilingDocument {
    /// Filesystem path of the downloaded primary document
    pub path: PathBuf,

    /// Company name as reported by the submissions index
    pub company: String,

    /// Zero-padded CIK
    pub cik: String,

    /// Form type, e.g. "10-K"
    pub form: String,

    /// Accession number with dashes
    pub accession_number: String,

    /// Filing date
    pub filing_date: NaiveDate,
}

/// The JSON representation of a parsed filing.
///
/// `text` carries the full document text; everything else is metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingRecord {
    pub text: String,
    pub company: String,
    pub cik: String,
    pub form: String,
    pub accession_number: String,
    pub filing_date: NaiveDate,
    pub source_path: String,
}

impl FilingDocument {
    /// Whether this document can be converted to a filing record.
    ///
    /// Only textual primary documents qualify; exhibits in other formats
    /// are downloaded but not converted.
    pub fn is_convertible(&self) -> bool {
        matches!(
            self.extension().as_deref(),
            Some("txt") | Some("htm") | Some("html")
        )
    }

    fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// Parse the stored document into a filing record.
    ///
    /// HTML documents are reduced to plain text; `.txt` documents pass
    /// through unchanged.
    pub fn parse(&self) -> AppResult<FilingRecord> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            AppError::Filings(format!("Failed to read document {:?}: {}", self.path, e))
        })?;

        let text = match self.extension().as_deref() {
            Some("htm") | Some("html") => html_to_text(&raw)?,
            Some("txt") => raw,
            other => {
                return Err(AppError::Filings(format!(
                    "Unsupported document format {:?} for {:?}",
                    other, self.path
                )))
            }
        };

        Ok(FilingRecord {
            text,
            company: self.company.clone(),
            cik: self.cik.clone(),
            form: self.form.clone(),
            accession_number: self.accession_number.clone(),
            filing_date: self.filing_date,
            source_path: self.path.to_string_lossy().to_string(),
        })
    }

    /// Destination path for the JSON representation: the document path with
    /// `:` replaced by `_`, plus a `.json` suffix.
    pub fn json_path(&self) -> PathBuf {
        let sanitized = self.path.to_string_lossy().replace(':', "_");
        PathBuf::from(format!("{}.json", sanitized))
    }

    /// Write the filing record as JSON next to the document.
    pub fn write_json(&self, record: &FilingRecord) -> AppResult<PathBuf> {
        let out = self.json_path();
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&out, json)?;
        Ok(out)
    }
}

/// Load a filing record from a JSON file.
pub fn read_record(path: &Path) -> AppResult<FilingRecord> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Filings(format!("Failed to read {:?}: {}", path, e)))?;
    let record = serde_json::from_str(&raw)
        .map_err(|e| AppError::Filings(format!("Failed to parse {:?}: {}", path, e)))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(path: &str) -> FilingDocument {
        FilingDocument {
            path: PathBuf::from(path),
            company: "Test Co".to_string(),
            cik: "0000000001".to_string(),
            form: "10-K".to_string(),
            accession_number: "0000000001-24-000001".to_string(),
            filing_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[test]
    fn test_is_convertible() {
        assert!(document("a/b/filing.htm").is_convertible());
        assert!(document("a/b/filing.HTML").is_convertible());
        assert!(document("a/b/filing.txt").is_convertible());
        assert!(!document("a/b/image.jpg").is_convertible());
        assert!(!document("a/b/noext").is_convertible());
    }

    #[test]
    fn test_json_path_sanitizes_colons() {
        let doc = document("downloads/acc::part.htm");
        assert_eq!(
            doc.json_path(),
            PathBuf::from("downloads/acc__part.htm.json")
        );
    }

    #[test]
    fn test_parse_and_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filing.htm");
        std::fs::write(&path, "<html><body><p>Item 1C. Cybersecurity</p></body></html>").unwrap();

        let mut doc = document("placeholder");
        doc.path = path;

        let record = doc.parse().unwrap();
        assert_eq!(record.text, "Item 1C. Cybersecurity");
        assert_eq!(record.form, "10-K");

        let out = doc.write_json(&record).unwrap();
        let loaded = read_record(&out).unwrap();
        assert_eq!(loaded.text, record.text);
        assert_eq!(loaded.accession_number, record.accession_number);
    }
}
