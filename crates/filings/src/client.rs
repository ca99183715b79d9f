//! HTTP client for the public SEC EDGAR endpoints.
//!
//! Three endpoints are consumed: the ticker→CIK mapping file, the per-CIK
//! submissions index, and the filing archive. Every request carries the
//! configured User-Agent; SEC rejects anonymous clients.

use edgar_core::{AppError, AppResult};
use reqwest::header::USER_AGENT;

use crate::company::{pad_cik, short_cik, CompanyId, TickerMap};
use crate::submissions::{FilingEntry, SubmissionsIndex};

const TICKER_MAP_URL: &str = "https://www.sec.gov/files/company_tickers.json";
const SUBMISSIONS_BASE: &str = "https://data.sec.gov/submissions";
const ARCHIVES_BASE: &str = "https://www.sec.gov/Archives/edgar/data";

/// Client for SEC EDGAR requests.
#[derive(Debug, Clone)]
pub struct EdgarClient {
    http: reqwest::Client,
    user_agent: String,
}

impl EdgarClient {
    /// Create a client with the User-Agent SEC requires, e.g.
    /// `"Name project (email@example.com)"`.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            user_agent: user_agent.into(),
        }
    }

    async fn get_text(&self, url: &str) -> AppResult<String> {
        tracing::debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| AppError::Filings(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Filings(format!(
                "SEC request failed ({}): {}",
                response.status(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Filings(format!("Failed to read body from {}: {}", url, e)))
    }

    /// Fetch and build the ticker→CIK mapping.
    pub async fn ticker_map(&self) -> AppResult<TickerMap> {
        let raw = self.get_text(TICKER_MAP_URL).await?;
        TickerMap::from_json(&raw)
    }

    /// Fetch the submissions index for a zero-padded CIK.
    pub async fn submissions(&self, padded_cik: &str) -> AppResult<SubmissionsIndex> {
        let url = format!("{}/CIK{}.json", SUBMISSIONS_BASE, padded_cik);
        let raw = self.get_text(&url).await?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::Filings(format!("Failed to parse submissions index: {}", e)))
    }

    /// Download a filing's primary document body.
    pub async fn download_document(
        &self,
        padded_cik: &str,
        entry: &FilingEntry,
    ) -> AppResult<String> {
        let url = format!(
            "{}/{}/{}/{}",
            ARCHIVES_BASE,
            short_cik(padded_cik),
            entry.accession_compact(),
            entry.primary_document
        );
        self.get_text(&url).await
    }

    /// Resolve a company identifier to a padded CIK and, for tickers, the
    /// registered company title.
    pub async fn resolve_company(
        &self,
        company: &CompanyId,
    ) -> AppResult<(String, Option<String>)> {
        match company {
            CompanyId::Cik(cik) => Ok((pad_cik(cik)?, None)),
            CompanyId::Ticker(ticker) => {
                let map = self.ticker_map().await?;
                let cik = map.resolve(ticker)?;
                let title = map.title(ticker).map(|t| t.to_string());
                Ok((cik, title))
            }
        }
    }
}
