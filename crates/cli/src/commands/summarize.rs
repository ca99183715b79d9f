//! Summarize command handler.
//!
//! Runs the chunked summarization pipeline over one filing JSON record and
//! prints per-batch progress with a linear time estimate.

use clap::Args;
use edgar_core::{config::AppConfig, AppError, AppResult};
use edgar_llm::{create_client, ChainStrategy, SummaryChain};
use edgar_summarize::{
    PipelineConfig, ProgressReporter, SplitConfig, SummarizePipeline,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Summarize a filing JSON record with a focus on cybersecurity
#[derive(Args, Debug)]
pub struct SummarizeCommand {
    /// Path to the filing JSON file
    pub input: PathBuf,

    /// Chunk size in characters
    #[arg(long, default_value_t = 2000)]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    #[arg(long, default_value_t = 200)]
    pub overlap: usize,

    /// Chunks summarized per LLM chain invocation
    #[arg(long, default_value_t = 20)]
    pub batch_size: usize,

    /// Section label to extract from the raw filing text
    #[arg(long, default_value = "Item 1C")]
    pub section: String,

    /// Chain strategy (map-reduce, stuff)
    #[arg(long, default_value = "map-reduce")]
    pub chain: String,

    /// Extra keywords added to the default cybersecurity set
    /// (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Output file (default: summaries/<input stem>_summary.txt under the
    /// workspace)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SummarizeCommand {
    /// Execute the summarize command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing summarize command");
        tracing::debug!("Summarize options: {:?}", self);

        // Fatal precondition: the active provider must have usable
        // credentials before any work starts
        config.validate()?;

        let strategy = ChainStrategy::parse(&self.chain).ok_or_else(|| {
            AppError::Config(format!(
                "Unknown chain strategy: {} (expected map-reduce or stuff)",
                self.chain
            ))
        })?;

        let endpoint = config
            .get_provider_config(&config.provider)
            .map(|pc| match pc {
                edgar_core::config::ProviderConfig::OpenAI { endpoint, .. } => endpoint,
                edgar_core::config::ProviderConfig::Ollama { endpoint, .. } => Some(endpoint),
            })
            .unwrap_or(None);

        let api_key = config.resolve_api_key(&config.provider);

        let client = create_client(&config.provider, endpoint.as_deref(), api_key.as_deref())
            .map_err(AppError::Config)?;
        let chain = SummaryChain::new(client, &config.model, strategy);

        let output_path = self.output.clone().unwrap_or_else(|| {
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("filing");
            config.summaries_dir().join(format!("{}_summary.txt", stem))
        });

        let pipeline_config = PipelineConfig {
            split: SplitConfig {
                chunk_size: self.chunk_size,
                overlap: self.overlap,
            },
            batch_size: self.batch_size,
            section_label: self.section.clone(),
            extra_keywords: self.keywords.clone(),
            output_path,
        };

        let reporter = ProgressReporter::new(Arc::new(|event| {
            println!("{}", event.format_simple());
        }));

        let pipeline = SummarizePipeline::new(chain, pipeline_config, reporter)?;

        println!(
            "Summarizing {} with {} ({} strategy)...",
            self.input.display(),
            config.model,
            strategy.as_str()
        );

        let report = pipeline.run(&self.input).await?;

        println!(
            "\nTotal processing time: {:.1} seconds ({:.1} minutes)",
            report.total_secs,
            report.total_secs / 60.0
        );
        println!("Summary saved to {}", report.output_path.display());

        Ok(())
    }
}
