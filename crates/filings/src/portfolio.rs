//! Filing portfolio: a named download directory plus a manifest of the
//! documents stored in it.
//!
//! The portfolio exposes the two operations the rest of the application
//! consumes: download filings by form type and company identifier
//! (optionally restricted to a date range), and enumerate stored documents
//! by form type.

use chrono::NaiveDate;
use edgar_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::EdgarClient;
use crate::company::{short_cik, CompanyId};
use crate::document::FilingDocument;

const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Manifest {
    documents: Vec<FilingDocument>,
}

/// A portfolio of downloaded filings rooted at a directory.
pub struct Portfolio {
    dir: PathBuf,
    client: EdgarClient,
    manifest: Manifest,
}

impl Portfolio {
    /// Open (or create) a portfolio directory and load its manifest.
    pub fn open(dir: impl Into<PathBuf>, user_agent: &str) -> AppResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest = if manifest_path.exists() {
            let raw = std::fs::read_to_string(&manifest_path)?;
            serde_json::from_str(&raw).map_err(|e| {
                AppError::Filings(format!(
                    "Failed to parse manifest {:?}: {}",
                    manifest_path, e
                ))
            })?
        } else {
            Manifest::default()
        };

        Ok(Self {
            dir,
            client: EdgarClient::new(user_agent),
            manifest,
        })
    }

    /// The portfolio's root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Download all filings of one form type for a company, optionally
    /// restricted to an inclusive filing-date range.
    ///
    /// Documents already present on disk are not re-downloaded. Returns the
    /// documents of this form now tracked for the company, newly downloaded
    /// or not.
    pub async fn download_submissions(
        &mut self,
        form: &str,
        company: &CompanyId,
        date_range: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<FilingDocument>> {
        let (cik, title) = self.client.resolve_company(company).await?;
        let index = self.client.submissions(&cik).await?;

        let company_name = if !index.name.is_empty() {
            index.name.clone()
        } else {
            title.unwrap_or_else(|| company.label().to_string())
        };

        let entries = index.select(form, date_range)?;
        tracing::info!(
            form,
            company = %company_name,
            count = entries.len(),
            "Selected filings from submissions index"
        );

        let mut documents = Vec::with_capacity(entries.len());

        for entry in entries {
            let dest = self
                .dir
                .join(short_cik(&cik))
                .join(entry.accession_compact())
                .join(&entry.primary_document);

            if dest.exists() {
                tracing::debug!(path = %dest.display(), "Already downloaded");
            } else {
                let body = self.client.download_document(&cik, &entry).await?;
                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&dest, body)?;
                tracing::info!(path = %dest.display(), "Downloaded filing document");
            }

            let document = FilingDocument {
                path: dest,
                company: company_name.clone(),
                cik: cik.clone(),
                form: entry.form.clone(),
                accession_number: entry.accession_number.clone(),
                filing_date: entry.filing_date,
            };

            self.track(document.clone());
            documents.push(document);
        }

        self.save_manifest()?;
        Ok(documents)
    }

    /// Enumerate stored documents of one form type, in manifest order.
    pub fn documents_by_type(&self, form: &str) -> Vec<FilingDocument> {
        self.manifest
            .documents
            .iter()
            .filter(|d| d.form == form)
            .cloned()
            .collect()
    }

    fn track(&mut self, document: FilingDocument) {
        let exists = self.manifest.documents.iter().any(|d| {
            d.accession_number == document.accession_number && d.path == document.path
        });
        if !exists {
            self.manifest.documents.push(document);
        }
    }

    fn save_manifest(&self) -> AppResult<()> {
        let path = self.dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(&self.manifest)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
