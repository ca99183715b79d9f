//! Command handlers for the edgar-digest CLI.

pub mod fetch;
pub mod summarize;

// Re-export command types for convenience
pub use fetch::FetchCommand;
pub use summarize::SummarizeCommand;
