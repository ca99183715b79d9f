//! LLM integration crate for the edgar-digest CLI.
//!
//! Provides a provider-agnostic abstraction for LLM completions plus the
//! summarization chain used by the filing pipeline.
//!
//! # Providers
//! - **OpenAI**: chat completions (default)
//! - **Ollama**: local LLM runtime, keyless
//!
//! # Example
//! ```no_run
//! use edgar_llm::{create_client, ChainStrategy, SummaryChain};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client("ollama", None, None)?;
//! let chain = SummaryChain::new(client, "llama3.2", ChainStrategy::MapReduce);
//! let output = chain.invoke(&["some text".to_string()]).await?;
//! println!("{}", output.normalize());
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod client;
pub mod factory;
pub mod prompts;
pub mod providers;

// Re-export main types
pub use chain::{ChainOutput, ChainStrategy, SummaryChain};
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient};
