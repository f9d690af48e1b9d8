//! Command handlers for the Newsdesk CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod generate;
pub mod profile;
pub mod questions;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use generate::GenerateCommand;
pub use profile::ProfileCommand;
pub use questions::QuestionsCommand;

use newsdesk_core::config::{AppConfig, ProviderConfig};
use newsdesk_core::{AppError, AppResult};
use newsdesk_llm::{create_client, LlmClient};
use std::sync::Arc;

/// Create the generation client for the configured provider.
pub(crate) fn build_llm_client(config: &AppConfig) -> AppResult<Arc<dyn LlmClient>> {
    let provider_config = config.get_provider_config(&config.provider);

    let endpoint = match provider_config {
        Some(ProviderConfig::Ollama { ref endpoint, .. }) => Some(endpoint.clone()),
        Some(ProviderConfig::Gemini { ref endpoint, .. }) => endpoint.clone(),
        Some(ProviderConfig::OpenAI { ref endpoint, .. }) => endpoint.clone(),
        None => None,
    };

    let api_key = config.resolve_api_key(&config.provider);

    create_client(&config.provider, endpoint.as_deref(), api_key.as_deref())
        .map_err(AppError::Config)
}
