//! SEC EDGAR filings retrieval for the edgar-digest CLI.
//!
//! This crate talks to the public EDGAR endpoints to download filings by
//! form type and company identifier, stores them under a portfolio
//! directory, and converts the textual primary documents into JSON filing
//! records with a `text` field that the summarization pipeline consumes.

pub mod client;
pub mod company;
pub mod document;
pub mod portfolio;
pub mod submissions;
pub mod text;

// Re-export main types
pub use client::EdgarClient;
pub use company::CompanyId;
pub use document::{read_record, FilingDocument, FilingRecord};
pub use portfolio::Portfolio;
pub use submissions::{FilingEntry, SubmissionsIndex};
