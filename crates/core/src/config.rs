//! Configuration management for the edgar-digest CLI.
//!
//! Configuration is merged from multiple sources, in precedence order:
//! - Built-in defaults
//! - Config file (`.edgar/config.yaml` in the workspace)
//! - Environment variables
//! - Command-line flags
//!
//! The resolved `AppConfig` is constructed once at startup and passed by
//! reference into every entry point; no component reads process environment
//! state after that.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (downloads and summaries live under it)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider ("openai" or "ollama")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// API key for the LLM provider
    pub api_key: Option<String>,

    /// User-Agent string sent with every SEC EDGAR request
    pub sec_user_agent: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// LLM provider configurations from the config file
    pub llm: Option<LlmConfig>,
}

/// LLM configuration from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    OpenAI {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: String,
        endpoint: Option<String>,
    },
    Ollama {
        endpoint: String,
        model: String,
        timeout: Option<u64>,
    },
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmConfig>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
    sec: Option<SecConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SecConfig {
    #[serde(rename = "userAgent")]
    user_agent: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            sec_user_agent: None,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `EDGAR_WORKSPACE`: Override workspace path
    /// - `EDGAR_CONFIG`: Path to config file
    /// - `EDGAR_PROVIDER`: LLM provider
    /// - `EDGAR_MODEL`: Model identifier
    /// - `EDGAR_API_KEY`: API key
    /// - `SEC_USER_AGENT`: User-Agent for SEC requests
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("EDGAR_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("EDGAR_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.workspace.join(".edgar/config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override the config file
        if let Ok(provider) = std::env::var("EDGAR_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("EDGAR_MODEL") {
            config.model = model;
        }

        if let Ok(key) = std::env::var("EDGAR_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(ua) = std::env::var("SEC_USER_AGENT") {
            config.sec_user_agent = Some(ua);
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(sec) = config_file.sec {
            if let Some(ua) = sec.user_agent {
                result.sec_user_agent = Some(ua);
            }
        }

        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();

            if let Some(provider_config) = llm.providers.get(&llm.active_provider) {
                result.model = match provider_config {
                    ProviderConfig::OpenAI { model, .. } => model.clone(),
                    ProviderConfig::Ollama { model, .. } => model.clone(),
                };
            }

            result.llm = Some(llm);
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the
    /// config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the configuration for a named provider, if the config file
    /// declares one.
    pub fn get_provider_config(&self, provider: &str) -> Option<ProviderConfig> {
        self.llm
            .as_ref()
            .and_then(|llm| llm.providers.get(provider).cloned())
    }

    /// Resolve the API key for a provider.
    ///
    /// `EDGAR_API_KEY` (or `--api-key` plumbed into `api_key`) wins;
    /// otherwise the provider's `apiKeyEnv` indirection is consulted,
    /// falling back to `OPENAI_API_KEY` for the OpenAI provider.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        if let Some(ProviderConfig::OpenAI { api_key_env, .. }) =
            self.get_provider_config(provider)
        {
            if let Ok(key) = std::env::var(&api_key_env) {
                return Some(key);
            }
        }

        if provider == "openai" {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                return Some(key);
            }
        }

        None
    }

    /// Validate configuration for the active provider.
    ///
    /// A provider that requires credentials with none resolvable is a fatal
    /// precondition failure: the caller reports it and exits non-zero
    /// before any work is attempted.
    pub fn validate(&self) -> AppResult<()> {
        let provider = &self.provider;
        let known_providers = ["openai", "ollama"];

        if !known_providers.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                known_providers.join(", ")
            )));
        }

        if provider == "openai" && self.resolve_api_key(provider).is_none() {
            return Err(AppError::Config(
                "OPENAI_API_KEY is not set. Create a .env file with your \
                 OPENAI_API_KEY or export it in the environment."
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the preconditions for talking to SEC EDGAR.
    ///
    /// SEC rejects requests without a descriptive User-Agent, so fetch
    /// refuses to start without one.
    pub fn validate_sec(&self) -> AppResult<()> {
        match self.sec_user_agent.as_deref() {
            Some(ua) if !ua.trim().is_empty() => Ok(()),
            _ => Err(AppError::Config(
                "SEC_USER_AGENT is not set. SEC EDGAR requires a User-Agent \
                 like \"Name project (email@example.com)\"."
                    .to_string(),
            )),
        }
    }

    /// Get the path to the .edgar directory.
    pub fn edgar_dir(&self) -> PathBuf {
        self.workspace.join(".edgar")
    }

    /// Default output directory for summaries.
    pub fn summaries_dir(&self) -> PathBuf {
        self.workspace.join("summaries")
    }
}
