//! Deterministic local embedding provider.
//!
//! Hashes character trigrams and whole words into a fixed-size vector. Not
//! semantically meaningful like a real model, but consistent and
//! content-dependent, which is enough for tests and offline development:
//! identical text always maps to the identical unit vector, and texts that
//! share vocabulary land closer together than texts that don't.

use crate::embeddings::provider::EmbeddingProvider;
use newsdesk_core::AppResult;
use std::collections::HashMap;

#[derive(Debug)]
pub struct MockProvider {
    dimensions: usize,
}

impl MockProvider {
    /// Create a new mock provider with the given vector size.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        let lower = text.to_lowercase();
        let mut word_freq: HashMap<&str, u32> = HashMap::new();
        for word in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 1)
        {
            *word_freq.entry(word).or_insert(0) += 1;
        }

        for (word, freq) in &word_freq {
            let bytes = word.as_bytes();

            // Character trigrams spread each word over several dimensions.
            for window in bytes.windows(3) {
                let hash = window
                    .iter()
                    .fold(0u64, |acc, &b| acc.wrapping_mul(37).wrapping_add(b as u64));
                vector[(hash as usize) % self.dimensions] += (*freq as f32).sqrt();
            }

            // The whole word gets its own dimension as well.
            let hash = bytes
                .iter()
                .fold(0u64, |acc, &b| acc.wrapping_mul(31).wrapping_add(b as u64));
            vector[(hash as usize) % self.dimensions] += *freq as f32;
        }

        // Unit-normalize so cosine similarity behaves like a real model's.
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}
