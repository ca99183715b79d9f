//! Chunk-based LLM summarization pipeline for SEC filings.
//!
//! Takes a filing JSON record (a mapping with a `text` field), splits the
//! text into overlapping chunks, keeps the cybersecurity-relevant ones,
//! extracts the "Item 1C" section from the raw text, summarizes the
//! selection in fixed-size batches through a map-reduce chain, and combines
//! everything into one final structured summary written to disk.

pub mod keywords;
pub mod loader;
pub mod pipeline;
pub mod progress;
pub mod section;
pub mod splitter;

// Re-export main types
pub use keywords::{KeywordFilter, DEFAULT_KEYWORDS};
pub use loader::load_filing_text;
pub use pipeline::{write_summary, PipelineConfig, PipelineReport, SummarizePipeline, INSTRUCTION};
pub use progress::{ProgressCallback, ProgressEvent, ProgressReporter};
pub use section::{extract_section, DEFAULT_END_LABELS};
pub use splitter::{split_text, SplitConfig};
