//! Summarization chain over an LLM client.
//!
//! A chain takes an ordered sequence of text units and a strategy:
//!
//! - `MapReduce`: summarize each unit with a map prompt, then combine the
//!   intermediate summaries in a single reduce call.
//! - `Stuff`: concatenate all units into one call.
//!
//! The provider's reply is probed once at this boundary and represented as a
//! closed tagged union (`ChainOutput`), so downstream normalization is a
//! total match with no runtime type inspection.

use crate::client::{LlmClient, LlmRequest};
use crate::prompts;
use edgar_core::AppResult;
use serde_json::Value;
use std::sync::Arc;

/// Preferred string-valued fields when normalizing a mapping result,
/// checked in order.
const PREFERRED_KEYS: [&str; 5] = ["output_text", "text", "summary", "result", "content"];

/// Chain strategy identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStrategy {
    /// Summarize each unit, then combine the summaries.
    MapReduce,
    /// Concatenate all units into a single call.
    Stuff,
}

impl ChainStrategy {
    /// Parse a strategy from its identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "map-reduce" | "map_reduce" => Some(Self::MapReduce),
            "stuff" => Some(Self::Stuff),
            _ => None,
        }
    }

    /// Get the canonical strategy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MapReduce => "map-reduce",
            Self::Stuff => "stuff",
        }
    }
}

/// Result of a chain invocation, classified at the provider boundary.
///
/// Providers return free-form text; when that text parses as a JSON object
/// or array it is carried structurally, otherwise it stays a plain string.
#[derive(Debug, Clone)]
pub enum ChainOutput {
    /// The reply parsed as a JSON object.
    Mapping(serde_json::Map<String, Value>),
    /// The reply parsed as a JSON array.
    Sequence(Vec<Value>),
    /// A plain string reply.
    Scalar(String),
}

impl ChainOutput {
    /// Classify raw provider content into one of the three variants.
    pub fn from_content(content: String) -> Self {
        match serde_json::from_str::<Value>(content.trim()) {
            Ok(Value::Object(map)) => Self::Mapping(map),
            Ok(Value::Array(items)) => Self::Sequence(items),
            _ => Self::Scalar(content),
        }
    }

    /// Normalize the output into a single string.
    ///
    /// Total: every variant produces some string, degrading to JSON
    /// stringification when nothing better is available.
    ///
    /// - `Mapping`: the first present string-valued field among
    ///   `output_text`, `text`, `summary`, `result`, `content`; otherwise
    ///   the serialization of the whole mapping.
    /// - `Sequence`: string elements joined with newlines, non-string
    ///   elements serialized.
    /// - `Scalar`: the string itself.
    pub fn normalize(&self) -> String {
        match self {
            Self::Mapping(map) => {
                for key in PREFERRED_KEYS {
                    if let Some(Value::String(s)) = map.get(key) {
                        return s.clone();
                    }
                }
                Value::Object(map.clone()).to_string()
            }
            Self::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Scalar(s) => s.clone(),
        }
    }
}

/// A summarization chain bound to a client, model, and strategy.
pub struct SummaryChain {
    client: Arc<dyn LlmClient>,
    model: String,
    strategy: ChainStrategy,
    temperature: f32,
}

impl SummaryChain {
    /// Create a chain. Temperature is pinned to 0 for reproducible
    /// summaries.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>, strategy: ChainStrategy) -> Self {
        Self {
            client,
            model: model.into(),
            strategy,
            temperature: 0.0,
        }
    }

    /// Invoke the chain over an ordered sequence of text units.
    ///
    /// Units are processed strictly sequentially; each call blocks until
    /// the provider returns. An empty sequence yields an empty scalar
    /// without touching the provider.
    pub async fn invoke(&self, units: &[String]) -> AppResult<ChainOutput> {
        if units.is_empty() {
            return Ok(ChainOutput::Scalar(String::new()));
        }

        match self.strategy {
            ChainStrategy::MapReduce => {
                let mut partials = Vec::with_capacity(units.len());
                for unit in units {
                    let prompt = prompts::map_prompt(unit)?;
                    let response = self.complete(prompt).await?;
                    partials.push(response.trim().to_string());
                }

                let joined = partials.join("\n\n");
                let prompt = prompts::reduce_prompt(&joined)?;
                let response = self.complete(prompt).await?;
                Ok(ChainOutput::from_content(response))
            }
            ChainStrategy::Stuff => {
                let joined = units.join("\n\n");
                let prompt = prompts::stuff_prompt(&joined)?;
                let response = self.complete(prompt).await?;
                Ok(ChainOutput::from_content(response))
            }
        }
    }

    async fn complete(&self, prompt: String) -> AppResult<String> {
        let request = LlmRequest::new(prompt, &self.model).with_temperature(self.temperature);
        let response = self.client.complete(&request).await?;
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{LlmResponse, LlmUsage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock client that replies with a fixed prefix plus a call counter.
    struct MockClient {
        calls: AtomicUsize,
        reply: String,
    }

    impl MockClient {
        fn new(reply: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: reply.to_string(),
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
                content: self.reply.clone(),
                model: "mock".to_string(),
                usage: LlmUsage::default(),
            })
        }
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(ChainStrategy::parse("map-reduce"), Some(ChainStrategy::MapReduce));
        assert_eq!(ChainStrategy::parse("map_reduce"), Some(ChainStrategy::MapReduce));
        assert_eq!(ChainStrategy::parse("stuff"), Some(ChainStrategy::Stuff));
        assert_eq!(ChainStrategy::parse("refine"), None);
    }

    #[test]
    fn test_normalize_mapping_preferred_key() {
        let output = ChainOutput::from_content(r#"{"output_text": "hello"}"#.to_string());
        assert_eq!(output.normalize(), "hello");
    }

    #[test]
    fn test_normalize_mapping_key_order() {
        let output =
            ChainOutput::from_content(r#"{"content": "last", "text": "first"}"#.to_string());
        assert_eq!(output.normalize(), "first");
    }

    #[test]
    fn test_normalize_mapping_without_preferred_key() {
        let output = ChainOutput::from_content(r#"{"other": 42}"#.to_string());
        let normalized = output.normalize();
        let parsed: serde_json::Value = serde_json::from_str(&normalized).unwrap();
        assert_eq!(parsed["other"], 42);
    }

    #[test]
    fn test_normalize_mapping_non_string_preferred_value() {
        // A preferred key whose value is not a string does not count
        let output = ChainOutput::from_content(r#"{"text": 1, "summary": "s"}"#.to_string());
        assert_eq!(output.normalize(), "s");
    }

    #[test]
    fn test_normalize_sequence() {
        let output = ChainOutput::from_content(r#"["a", "b"]"#.to_string());
        assert_eq!(output.normalize(), "a\nb");
    }

    #[test]
    fn test_normalize_sequence_mixed() {
        let output = ChainOutput::from_content(r#"["a", {"k": 1}]"#.to_string());
        assert_eq!(output.normalize(), "a\n{\"k\":1}");
    }

    #[test]
    fn test_normalize_scalar() {
        let output = ChainOutput::from_content("x".to_string());
        assert_eq!(output.normalize(), "x");
    }

    #[tokio::test]
    async fn test_map_reduce_call_count() {
        let client = Arc::new(MockClient::new("partial summary"));
        let chain = SummaryChain::new(client.clone(), "mock", ChainStrategy::MapReduce);

        let units = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        let output = chain.invoke(&units).await.unwrap();

        // One map call per unit plus one reduce call
        assert_eq!(client.calls.load(Ordering::SeqCst), 4);
        assert_eq!(output.normalize(), "partial summary");
    }

    #[tokio::test]
    async fn test_stuff_single_call() {
        let client = Arc::new(MockClient::new("whole summary"));
        let chain = SummaryChain::new(client.clone(), "mock", ChainStrategy::Stuff);

        let units = vec!["one".to_string(), "two".to_string()];
        let output = chain.invoke(&units).await.unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(output.normalize(), "whole summary");
    }

    #[tokio::test]
    async fn test_empty_units_skip_provider() {
        let client = Arc::new(MockClient::new("unused"));
        let chain = SummaryChain::new(client.clone(), "mock", ChainStrategy::MapReduce);

        let output = chain.invoke(&[]).await.unwrap();
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert_eq!(output.normalize(), "");
    }
}
