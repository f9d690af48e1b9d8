//! LLM provider factory.
//!
//! Creates generation clients from a provider name, an optional custom
//! endpoint, and an optional API key. Provider adapters are always handed to
//! callers as trait objects so they can be replaced by stubs in tests.

use crate::client::LlmClient;
use crate::providers::OllamaClient;
use std::sync::Arc;

/// Create a generation client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("ollama", "gemini", "openai")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - Optional API key (for providers that require it)
///
/// # Errors
/// Returns an error string if the provider is unknown, not yet implemented,
/// or missing a required API key.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<Arc<dyn LlmClient>, String> {
    match provider.to_lowercase().as_str() {
        "ollama" => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            let client = OllamaClient::with_base_url(base_url);
            Ok(Arc::new(client))
        }
        "gemini" => {
            if api_key.is_none() {
                return Err("Gemini provider requires API key".to_string());
            }
            // TODO: port the Gemini client once the generateContent response
            // mapping is settled
            Err("Gemini provider not yet implemented".to_string())
        }
        "openai" => {
            if api_key.is_none() {
                return Err("OpenAI provider requires API key".to_string());
            }
            Err("OpenAI provider not yet implemented".to_string())
        }
        _ => Err(format!("Unknown provider: {}", provider)),
    }
}
