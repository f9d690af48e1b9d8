//! Embedding provider configuration.

use serde::{Deserialize, Serialize};

/// Configuration for an embedding provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider name ("ollama", "mock")
    pub provider: String,

    /// Model identifier (e.g., "nomic-embed-text")
    pub model: String,

    /// Expected embedding dimensions
    pub dimensions: usize,

    /// Normalize vectors to unit length
    #[serde(default = "default_normalize")]
    pub normalize: bool,

    /// Maximum texts per provider request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_normalize() -> bool {
    true
}

fn default_batch_size() -> usize {
    32
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            normalize: default_normalize(),
            batch_size: default_batch_size(),
        }
    }
}

impl EmbeddingConfig {
    /// Config for the deterministic local provider, used by tests and
    /// offline development.
    pub fn mock(dimensions: usize) -> Self {
        Self {
            provider: "mock".to_string(),
            model: "trigram-v1".to_string(),
            dimensions,
            ..Self::default()
        }
    }
}
