//! Ollama embedding provider.
//!
//! Calls Ollama's local embeddings API (models like nomic-embed-text).
//! Transient HTTP failures are retried a bounded number of times with
//! backoff; anything still failing after that surfaces as
//! `AppError::Embedding`, which the answerer treats as "retrieval
//! unavailable".

use crate::embeddings::config::EmbeddingConfig;
use crate::embeddings::provider::EmbeddingProvider;
use newsdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const EMBEDDING_ENDPOINT: &str = "/api/embeddings";

/// Maximum attempts per text.
const MAX_ATTEMPTS: u32 = 3;

/// Initial backoff, doubled per retry.
const INITIAL_BACKOFF_MS: u64 = 100;

/// Request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Request payload for the Ollama embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    prompt: String,
}

/// Response from the Ollama embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Debug)]
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
    normalize: bool,
}

impl OllamaProvider {
    /// Create a new Ollama embedding provider.
    ///
    /// The base URL comes from `OLLAMA_URL` when set.
    pub fn new(config: &EmbeddingConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AppError::Embedding(format!("Failed to create HTTP client for Ollama: {}", e))
            })?;

        let base_url =
            std::env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());

        Ok(Self {
            client,
            base_url,
            model: config.model.clone(),
            dimensions: config.dimensions,
            normalize: config.normalize,
        })
    }

    /// Embed a single text, retrying transient failures.
    async fn embed_with_retry(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}{}", self.base_url, EMBEDDING_ENDPOINT);
        let mut backoff = Duration::from_millis(INITIAL_BACKOFF_MS);
        let mut last_error = String::new();

        for attempt in 1..=MAX_ATTEMPTS {
            let request = EmbeddingRequest {
                model: self.model.clone(),
                prompt: text.to_string(),
            };

            match self.client.post(&url).json(&request).send().await {
                Ok(response) if response.status().is_success() => {
                    let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
                        AppError::Embedding(format!("Failed to parse Ollama embedding: {}", e))
                    })?;
                    return Ok(self.postprocess(parsed.embedding)?);
                }
                Ok(response) => {
                    let status = response.status();
                    last_error = format!("Ollama embeddings API returned {}", status);
                    // Client errors won't improve with retries
                    if status.is_client_error() {
                        break;
                    }
                    tracing::warn!(
                        "Embedding attempt {}/{} failed ({}), backing off",
                        attempt,
                        MAX_ATTEMPTS,
                        status
                    );
                }
                Err(e) => {
                    last_error = format!("Ollama embeddings request failed: {}", e);
                    tracing::warn!(
                        "Embedding attempt {}/{} failed ({}), backing off",
                        attempt,
                        MAX_ATTEMPTS,
                        e
                    );
                }
            }

            if attempt < MAX_ATTEMPTS {
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
        }

        Err(AppError::Embedding(last_error))
    }

    /// Validate dimensions and optionally unit-normalize.
    fn postprocess(&self, mut embedding: Vec<f32>) -> AppResult<Vec<f32>> {
        if embedding.len() != self.dimensions {
            return Err(AppError::Embedding(format!(
                "Expected {}-dimensional embedding, got {}",
                self.dimensions,
                embedding.len()
            )));
        }

        if self.normalize {
            let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                for v in &mut embedding {
                    *v /= norm;
                }
            }
        }

        Ok(embedding)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed_with_retry(text).await?);
        }
        Ok(embeddings)
    }
}
