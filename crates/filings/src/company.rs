//! Company identification for EDGAR queries.
//!
//! EDGAR addresses companies by CIK (Central Index Key). Callers may supply
//! a ticker symbol instead; tickers are resolved through the SEC's public
//! mapping file.

use edgar_core::{AppError, AppResult};
use serde::Deserialize;
use std::collections::HashMap;

/// A company identifier accepted by the fetch entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyId {
    /// Ticker symbol, e.g. "CSCO"
    Ticker(String),
    /// Central Index Key, with or without leading zeros
    Cik(String),
}

impl CompanyId {
    /// Short display form for logs.
    pub fn label(&self) -> &str {
        match self {
            Self::Ticker(t) => t,
            Self::Cik(c) => c,
        }
    }
}

/// Zero-pad a CIK to the 10 digits EDGAR URLs expect.
///
/// Rejects anything that is not 1-10 ASCII digits.
pub fn pad_cik(cik: &str) -> AppResult<String> {
    let trimmed = cik.trim();
    if trimmed.is_empty()
        || trimmed.len() > 10
        || !trimmed.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(AppError::Filings(format!("Invalid CIK: {:?}", cik)));
    }
    Ok(format!("{:0>10}", trimmed))
}

/// Strip leading zeros for the archive URL path form.
pub fn short_cik(padded: &str) -> &str {
    let stripped = padded.trim_start_matches('0');
    if stripped.is_empty() {
        "0"
    } else {
        stripped
    }
}

/// One entry in the SEC `company_tickers.json` mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerEntry {
    pub cik_str: u64,
    pub ticker: String,
    pub title: String,
}

/// Ticker → CIK lookup built from the SEC mapping file.
///
/// The file is keyed by arbitrary indices; lookups are by upper-cased
/// ticker symbol.
#[derive(Debug, Clone)]
pub struct TickerMap {
    by_ticker: HashMap<String, TickerEntry>,
}

impl TickerMap {
    /// Build the lookup from the raw mapping document.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let entries: HashMap<String, TickerEntry> = serde_json::from_str(raw)
            .map_err(|e| AppError::Filings(format!("Failed to parse ticker mapping: {}", e)))?;

        let by_ticker = entries
            .into_values()
            .map(|entry| (entry.ticker.to_uppercase(), entry))
            .collect();

        Ok(Self { by_ticker })
    }

    /// Resolve a ticker to its padded CIK.
    pub fn resolve(&self, ticker: &str) -> AppResult<String> {
        let entry = self
            .by_ticker
            .get(&ticker.trim().to_uppercase())
            .ok_or_else(|| AppError::Filings(format!("Unknown ticker: {}", ticker)))?;
        pad_cik(&entry.cik_str.to_string())
    }

    /// Company title for a ticker, if known.
    pub fn title(&self, ticker: &str) -> Option<&str> {
        self.by_ticker
            .get(&ticker.trim().to_uppercase())
            .map(|e| e.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_cik() {
        assert_eq!(pad_cik("320193").unwrap(), "0000320193");
        assert_eq!(pad_cik("0001804591").unwrap(), "0001804591");
    }

    #[test]
    fn test_pad_cik_rejects_garbage() {
        assert!(pad_cik("").is_err());
        assert!(pad_cik("12a45").is_err());
        assert!(pad_cik("12345678901").is_err());
    }

    #[test]
    fn test_short_cik() {
        assert_eq!(short_cik("0000320193"), "320193");
        assert_eq!(short_cik("0000000000"), "0");
    }

    #[test]
    fn test_ticker_map_resolution() {
        let raw = r#"{
            "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
            "1": {"cik_str": 858877, "ticker": "CSCO", "title": "CISCO SYSTEMS, INC."}
        }"#;

        let map = TickerMap::from_json(raw).unwrap();
        assert_eq!(map.resolve("csco").unwrap(), "0000858877");
        assert_eq!(map.resolve("AAPL").unwrap(), "0000320193");
        assert_eq!(map.title("aapl"), Some("Apple Inc."));
        assert!(map.resolve("NOPE").is_err());
    }
}
