//! Summarization pipeline orchestrator.
//!
//! A single linear pass: load the filing text, split it into overlapping
//! chunks, select the cybersecurity-relevant ones, extract the labeled
//! section from the raw text, summarize the selection batch by batch, then
//! combine the instruction, the section, and the batch summaries into the
//! final summary and write it to disk. No retries, no resumption, no
//! intermediate state between runs.

use edgar_core::{AppError, AppResult};
use edgar_llm::SummaryChain;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::keywords::KeywordFilter;
use crate::loader::load_filing_text;
use crate::progress::ProgressReporter;
use crate::section::{extract_section, DEFAULT_END_LABELS};
use crate::splitter::{split_text, SplitConfig};

/// Instruction block placed ahead of the source material in the final
/// combine call.
pub const INSTRUCTION: &str = "You are an analyst. Produce a concise but detailed structured \
summary focused ONLY on cybersecurity matters. Include these sections: \
(1) Incidents mentioned (dates, scope, monetary impact if available), \
(2) Controls and mitigations (technical and organizational), \
(3) Insurance and limitations, \
(4) Third-party/vendor risks and dependencies, and \
(5) Outstanding exposures and recommended follow-ups. \
Use the following text as source material; do not invent facts. \
If information is missing, state 'not disclosed'.";

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Chunk splitting parameters
    pub split: SplitConfig,

    /// Chunks per summarization batch
    pub batch_size: usize,

    /// Start label of the section to extract from the raw text
    pub section_label: String,

    /// Keywords added to the default cybersecurity set
    pub extra_keywords: Vec<String>,

    /// Destination of the final summary
    pub output_path: PathBuf,
}

impl PipelineConfig {
    fn validate(&self) -> AppResult<()> {
        self.split.validate()?;
        if self.batch_size == 0 {
            return Err(AppError::Config("batch_size must be positive".to_string()));
        }
        Ok(())
    }
}

/// What a completed run produced, for display.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub chunk_count: usize,
    pub selected_count: usize,
    pub section_chars: usize,
    pub batch_count: usize,
    pub output_path: PathBuf,
    pub total_secs: f64,
}

/// The summarization pipeline.
pub struct SummarizePipeline {
    chain: SummaryChain,
    config: PipelineConfig,
    reporter: ProgressReporter,
}

impl SummarizePipeline {
    /// Create a pipeline; fails on invalid configuration.
    pub fn new(
        chain: SummaryChain,
        config: PipelineConfig,
        reporter: ProgressReporter,
    ) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            chain,
            config,
            reporter,
        })
    }

    /// Run the pipeline over one filing JSON file.
    pub async fn run(&self, input: &Path) -> AppResult<PipelineReport> {
        let started = Instant::now();

        let text = load_filing_text(input)?;
        tracing::info!(chars = text.len(), "Loaded filing text");

        let chunks = split_text(&text, &self.config.split)?;
        let chunk_count = chunks.len();
        self.reporter.split(chunk_count as u64);

        let filter = KeywordFilter::with_extra(self.config.extra_keywords.iter().cloned());
        let selected = filter.filter(chunks);
        let selected_count = selected.len();
        self.reporter.filter(selected_count as u64, chunk_count as u64);

        let section = extract_section(&text, &self.config.section_label, DEFAULT_END_LABELS);
        self.reporter
            .section(&self.config.section_label, section.chars().count() as u64);

        let batches: Vec<&[String]> = selected.chunks(self.config.batch_size).collect();
        let batch_count = batches.len();
        tracing::info!(batch_count, batch_size = self.config.batch_size, "Partitioned batches");

        let mut batch_summaries = Vec::with_capacity(batch_count);
        for (i, batch) in batches.iter().enumerate() {
            let batch_started = Instant::now();
            let output = self.chain.invoke(batch).await?;
            batch_summaries.push(output.normalize());
            self.reporter.batch(
                (i + 1) as u64,
                batch_count as u64,
                batch_started.elapsed().as_secs_f64(),
            );
        }

        let mut units = Vec::with_capacity(2 + batch_summaries.len());
        units.push(INSTRUCTION.to_string());
        if !section.is_empty() {
            units.push(section.clone());
        }
        units.extend(batch_summaries);

        self.reporter.combine(units.len() as u64);
        let final_output = self.chain.invoke(&units).await?;
        let summary = final_output.normalize();

        write_summary(&self.config.output_path, &summary)?;
        self.reporter
            .write(&self.config.output_path.to_string_lossy());

        Ok(PipelineReport {
            chunk_count,
            selected_count,
            section_chars: section.chars().count(),
            batch_count,
            output_path: self.config.output_path.clone(),
            total_secs: started.elapsed().as_secs_f64(),
        })
    }
}

/// Write the final summary, creating the destination directory if needed.
/// Prior content at the path is overwritten.
pub fn write_summary(path: &Path, summary: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, summary)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgar_core::AppResult;
    use edgar_llm::{ChainStrategy, LlmClient, LlmRequest, LlmResponse, LlmUsage};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockClient {
        calls: AtomicUsize,
    }

    impl MockClient {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for MockClient {
        fn provider_name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, _request: &LlmRequest) -> AppResult<LlmResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(LlmResponse {
                content: "mock summary".to_string(),
                model: "mock".to_string(),
                usage: LlmUsage::default(),
            })
        }
    }

    /// A 5000-character filing with "Item 1C" at offset 0, "breach" near
    /// offset 200, and "Item 2" at offset 2000.
    fn scenario_text() -> String {
        let mut text = String::from("Item 1C");
        text.push_str(&"a".repeat(200 - text.len()));
        text.push_str("breach");
        text.push_str(&"a".repeat(2000 - text.len()));
        text.push_str("Item 2");
        text.push_str(&"a".repeat(5000 - text.len()));
        assert_eq!(text.len(), 5000);
        text
    }

    fn pipeline(output: PathBuf, batch_size: usize) -> (SummarizePipeline, Arc<MockClient>) {
        let client = Arc::new(MockClient::new());
        let chain = SummaryChain::new(client.clone(), "mock", ChainStrategy::MapReduce);
        let config = PipelineConfig {
            split: SplitConfig {
                chunk_size: 2000,
                overlap: 200,
            },
            batch_size,
            section_label: "Item 1C".to_string(),
            extra_keywords: Vec::new(),
            output_path: output,
        };
        let pipeline =
            SummarizePipeline::new(chain, config, ProgressReporter::noop()).unwrap();
        (pipeline, client)
    }

    #[test]
    fn test_batch_partition_counts() {
        let chunks: Vec<String> = (0..7).map(|i| format!("chunk {}", i)).collect();

        let batches: Vec<&[String]> = chunks.chunks(3).collect();
        assert_eq!(batches.len(), 3); // ceil(7/3)
        assert!(batches.iter().all(|b| !b.is_empty()));

        let rejoined: Vec<String> = batches.concat();
        assert_eq!(rejoined, chunks);
    }

    #[test]
    fn test_invalid_batch_size_rejected() {
        let client = Arc::new(MockClient::new());
        let chain = SummaryChain::new(client, "mock", ChainStrategy::MapReduce);
        let config = PipelineConfig {
            split: SplitConfig::default(),
            batch_size: 0,
            section_label: "Item 1C".to_string(),
            extra_keywords: Vec::new(),
            output_path: PathBuf::from("out.txt"),
        };

        assert!(SummarizePipeline::new(chain, config, ProgressReporter::noop()).is_err());
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("filing.json");
        let output = dir.path().join("summaries").join("filing_summary.txt");

        let record = serde_json::json!({ "text": scenario_text() });
        std::fs::write(&input, record.to_string()).unwrap();

        let (pipeline, _client) = pipeline(output.clone(), 20);
        let report = pipeline.run(&input).await.unwrap();

        // 5000 chars at size 2000 / overlap 200 -> 3 chunks, one of which
        // contains "breach"
        assert_eq!(report.chunk_count, 3);
        assert_eq!(report.selected_count, 1);
        assert_eq!(report.batch_count, 1);

        // Section runs from "Item 1C" at 0 up to "Item 2" at 2000
        assert_eq!(report.section_chars, 2000);

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(!written.is_empty());
        assert_eq!(written, "mock summary");
    }

    #[tokio::test]
    async fn test_fallback_when_no_keyword_matches() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("filing.json");
        let output = dir.path().join("summary.txt");

        // No cybersecurity keywords anywhere
        let record = serde_json::json!({ "text": "zzz ".repeat(1200) });
        std::fs::write(&input, record.to_string()).unwrap();

        let (pipeline, _client) = pipeline(output.clone(), 20);
        let report = pipeline.run(&input).await.unwrap();

        // Identity fallback: every chunk is summarized
        assert_eq!(report.selected_count, report.chunk_count);
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_multiple_batches_call_counts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("filing.json");
        let output = dir.path().join("summary.txt");

        // Every chunk contains "security" so all chunks are selected
        let record = serde_json::json!({ "text": "security matters. ".repeat(600) });
        std::fs::write(&input, record.to_string()).unwrap();

        let (pipeline, client) = pipeline(output, 2);
        let report = pipeline.run(&input).await.unwrap();

        assert!(report.batch_count > 1);
        assert_eq!(report.selected_count, report.chunk_count);

        // Map-reduce per batch: one map call per chunk plus one reduce.
        // The combine invocation maps the instruction and each batch
        // summary (no section in this text), then reduces once.
        let batch_calls = report.selected_count + report.batch_count;
        let combine_calls = (1 + report.batch_count) + 1;
        let calls = client.calls.load(Ordering::SeqCst);
        assert_eq!(calls, batch_calls + combine_calls);
    }

    #[test]
    fn test_write_summary_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");

        write_summary(&path, "first").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");

        // Overwrites prior content
        write_summary(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
