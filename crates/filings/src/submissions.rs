//! Serde model of the EDGAR submissions index.
//!
//! `https://data.sec.gov/submissions/CIK##########.json` lists a company's
//! recent filings as parallel arrays under `filings.recent`: index `i` of
//! each array describes the same filing.

use chrono::NaiveDate;
use edgar_core::{AppError, AppResult};
use serde::Deserialize;

/// Top-level submissions document for one company.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionsIndex {
    #[serde(default)]
    pub cik: String,
    #[serde(default)]
    pub name: String,
    pub filings: Filings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Filings {
    pub recent: RecentFilings,
}

/// Parallel arrays describing recent filings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    pub accession_number: Vec<String>,
    pub filing_date: Vec<String>,
    pub form: Vec<String>,
    pub primary_document: Vec<String>,
}

/// One filing, zipped out of the parallel arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingEntry {
    pub accession_number: String,
    pub filing_date: NaiveDate,
    pub form: String,
    pub primary_document: String,
}

impl FilingEntry {
    /// Accession number without dashes, as used in archive URLs.
    pub fn accession_compact(&self) -> String {
        self.accession_number.replace('-', "")
    }
}

impl SubmissionsIndex {
    /// Select filings of exactly the given form type, optionally within an
    /// inclusive filing-date range.
    ///
    /// Form matching is exact: `10-K` does not select `10-K/A`; amended
    /// forms are requested as their own form type. Rows whose filing date
    /// does not parse, or with an empty primary document, are skipped with
    /// a warning rather than failing the whole index.
    pub fn select(
        &self,
        form: &str,
        date_range: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<FilingEntry>> {
        let recent = &self.filings.recent;
        let n = recent.form.len();

        if recent.accession_number.len() != n
            || recent.filing_date.len() != n
            || recent.primary_document.len() != n
        {
            return Err(AppError::Filings(
                "Submissions index arrays have mismatched lengths".to_string(),
            ));
        }

        let mut selected = Vec::new();

        for i in 0..n {
            if recent.form[i] != form {
                continue;
            }

            let date = match NaiveDate::parse_from_str(&recent.filing_date[i], "%Y-%m-%d") {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(
                        accession = %recent.accession_number[i],
                        "Skipping filing with unparseable date {:?}: {}",
                        recent.filing_date[i],
                        e
                    );
                    continue;
                }
            };

            if let Some((from, to)) = date_range {
                if date < from || date > to {
                    continue;
                }
            }

            if recent.primary_document[i].is_empty() {
                tracing::warn!(
                    accession = %recent.accession_number[i],
                    "Skipping filing without a primary document"
                );
                continue;
            }

            selected.push(FilingEntry {
                accession_number: recent.accession_number[i].clone(),
                filing_date: date,
                form: recent.form[i].clone(),
                primary_document: recent.primary_document[i].clone(),
            });
        }

        Ok(selected)
    }
}
