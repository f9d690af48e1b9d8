//! Configuration management for Newsdesk.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables
//! - Config files (.newsdesk/config.yaml)
//! - Command-line flags (applied last via [`AppConfig::with_overrides`])

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Main application configuration.
///
/// Holds the global options that affect behavior across commands: which
/// generation/embedding providers to use, where news search credentials
/// come from, and logging preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .newsdesk/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generation provider (e.g., "ollama", "gemini", "openai")
    pub provider: String,

    /// Generation model identifier
    pub model: String,

    /// Embedding provider (e.g., "ollama", "mock")
    pub embedding_provider: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Embedding vector dimensions
    pub embedding_dimensions: usize,

    /// API key for the generation provider
    pub api_key: Option<String>,

    /// API key for the news search provider
    pub search_api_key: Option<String>,

    /// Default target language (ISO 639-1), injected verbatim into prompts
    pub language: String,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Provider table from config.yaml
    pub providers: Option<ProvidersConfig>,
}

/// Provider configuration section from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    #[serde(rename = "activeEmbeddingProvider")]
    pub active_embedding_provider: String,

    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    Gemini {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: String,
        #[serde(rename = "embeddingModel")]
        embedding_model: Option<String>,
        endpoint: Option<String>,
    },
    OpenAI {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: String,
        #[serde(rename = "embeddingModel")]
        embedding_model: Option<String>,
        endpoint: Option<String>,
        #[serde(rename = "organizationEnv")]
        organization_env: Option<String>,
    },
    Ollama {
        endpoint: String,
        model: String,
        #[serde(rename = "embeddingModel")]
        embedding_model: Option<String>,
        timeout: Option<u64>,
    },
}

impl ProviderConfig {
    /// Get the generation model name for this provider.
    pub fn model(&self) -> &str {
        match self {
            Self::Gemini { model, .. } => model,
            Self::OpenAI { model, .. } => model,
            Self::Ollama { model, .. } => model,
        }
    }

    /// Get the embedding model name if configured.
    pub fn embedding_model(&self) -> Option<&str> {
        match self {
            Self::Gemini {
                embedding_model, ..
            } => embedding_model.as_deref(),
            Self::OpenAI {
                embedding_model, ..
            } => embedding_model.as_deref(),
            Self::Ollama {
                embedding_model, ..
            } => embedding_model.as_deref(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<ProvidersConfig>,
    search: Option<SearchConfig>,
    defaults: Option<DefaultsConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SearchConfig {
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DefaultsConfig {
    language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "ollama".to_string(), // Local-first default
            model: "llama3.2".to_string(),
            embedding_provider: "ollama".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            embedding_dimensions: 768,
            api_key: None,
            search_api_key: None,
            language: "en".to_string(),
            log_level: None,
            verbose: false,
            no_color: false,
            providers: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, defaults, and the
    /// workspace config file.
    ///
    /// Environment variables:
    /// - `NEWSDESK_WORKSPACE`: Override workspace path
    /// - `NEWSDESK_CONFIG`: Path to config file
    /// - `NEWSDESK_PROVIDER`: Generation provider
    /// - `NEWSDESK_MODEL`: Generation model identifier
    /// - `NEWSDESK_API_KEY`: Generation provider API key
    /// - `NEWSDESK_SEARCH_API_KEY`: News search API key
    /// - `NEWSDESK_LANGUAGE`: Default target language (ISO 639-1)
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("NEWSDESK_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("NEWSDESK_CONFIG") {
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
            config.workspace.join(".newsdesk/config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("NEWSDESK_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("NEWSDESK_MODEL") {
            config.model = model;
        }

        if let Ok(language) = std::env::var("NEWSDESK_LANGUAGE") {
            config.language = language;
        }

        if let Ok(key) = std::env::var("NEWSDESK_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(key) = std::env::var("NEWSDESK_SEARCH_API_KEY") {
            config.search_api_key = Some(key);
        }

        if config.log_level.is_none() {
            config.log_level = std::env::var("RUST_LOG").ok();
        }

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

        if let Some(defaults) = config_file.defaults {
            if let Some(language) = defaults.language {
                result.language = language;
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

        if let Some(search) = config_file.search {
            if let Some(env_var) = search.api_key_env {
                if let Ok(key) = std::env::var(&env_var) {
                    result.search_api_key = Some(key);
                }
            }
        }

        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();
            result.embedding_provider = llm.active_embedding_provider.clone();

            if let Some(provider_config) = llm.providers.get(&llm.active_provider) {
                result.model = provider_config.model().to_string();
            }

            if let Some(embed_config) = llm.providers.get(&llm.active_embedding_provider) {
                if let Some(embedding_model) = embed_config.embedding_model() {
                    result.embedding_model = embedding_model.to_string();
                }
            }

            result.providers = Some(llm);
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config
    /// file.
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
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .newsdesk directory.
    pub fn newsdesk_dir(&self) -> PathBuf {
        self.workspace.join(".newsdesk")
    }

    /// Ensure the .newsdesk directory exists.
    pub fn ensure_newsdesk_dir(&self) -> AppResult<()> {
        let dir = self.newsdesk_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                AppError::Config(format!("Failed to create .newsdesk directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Get the configuration for a named provider, if present.
    pub fn get_provider_config(&self, provider: &str) -> Option<ProviderConfig> {
        self.providers
            .as_ref()
            .and_then(|p| p.providers.get(provider).cloned())
    }

    /// Resolve the generation API key, preferring the explicit key over the
    /// provider's configured environment variable.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        if let Some(provider_config) = self.get_provider_config(provider) {
            let env_var = match provider_config {
                ProviderConfig::Gemini { api_key_env, .. } => Some(api_key_env),
                ProviderConfig::OpenAI { api_key_env, .. } => Some(api_key_env),
                ProviderConfig::Ollama { .. } => None,
            };

            if let Some(env_var) = env_var {
                if let Ok(key) = std::env::var(&env_var) {
                    return Some(key);
                }
            }
        }

        None
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let provider = &self.provider;
        let known_providers = ["ollama", "gemini", "openai"];

        if !known_providers.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                known_providers.join(", ")
            )));
        }

        if let Some(provider_config) = self.get_provider_config(provider) {
            match provider_config {
                ProviderConfig::Gemini { api_key_env, .. }
                | ProviderConfig::OpenAI { api_key_env, .. } => {
                    if self.api_key.is_none() && std::env::var(&api_key_env).is_err() {
                        return Err(AppError::Config(format!(
                            "API key not found in environment variable: {}",
                            api_key_env
                        )));
                    }
                }
                ProviderConfig::Ollama { .. } => {
                    // Ollama doesn't require API keys
                }
            }
        }

        Ok(())
    }
}
