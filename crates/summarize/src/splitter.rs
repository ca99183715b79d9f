//! Fixed-size overlapping chunk splitter.
//!
//! Cuts text into character windows of at most `chunk_size`, with each
//! window sharing exactly `overlap` characters with its predecessor. The
//! windows reconstruct the input: concatenating chunks with the first
//! `overlap` characters of every chunk after the first removed yields the
//! original text. Trailing text shorter than a full window is emitted,
//! never dropped.

use edgar_core::{AppError, AppResult};

/// Splitter configuration. Sizes are in characters, not bytes.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Target chunk size
    pub chunk_size: usize,

    /// Overlap between consecutive chunks; must be strictly less than
    /// `chunk_size`
    pub overlap: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            chunk_size: 2000,
            overlap: 200,
        }
    }
}

impl SplitConfig {
    /// Validate the invariant that splitting makes progress.
    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::Config("chunk_size must be positive".to_string()));
        }
        if self.overlap >= self.chunk_size {
            return Err(AppError::Config(format!(
                "overlap ({}) must be strictly less than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Split text into overlapping character windows.
///
/// Empty input yields no chunks. Slicing respects UTF-8 boundaries by
/// indexing over characters.
pub fn split_text(text: &str, config: &SplitConfig) -> AppResult<Vec<String>> {
    config.validate()?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    // Byte offset of every character boundary, including the end of text
    let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    boundaries.push(text.len());
    let n_chars = boundaries.len() - 1;

    let step = config.chunk_size - config.overlap;
    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        let end = (start + config.chunk_size).min(n_chars);
        chunks.push(text[boundaries[start]..boundaries[end]].to_string());
        if end == n_chars {
            break;
        }
        start += step;
    }

    Ok(chunks)
}
