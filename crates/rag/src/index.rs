//! In-memory vector index over one corpus.
//!
//! Built fresh for every answer call and owned exclusively by that call;
//! the corpus may change between questions, so no index survives a call.
//! Similarity is cosine, matching the unit-normalized vectors the providers
//! emit.

use crate::embeddings::EmbeddingProvider;
use crate::types::Corpus;
use newsdesk_core::{AppError, AppResult};

/// One embedded document; `position` points back into the corpus.
#[derive(Debug, Clone)]
struct IndexEntry {
    position: usize,
    embedding: Vec<f32>,
}

/// Read-only nearest-neighbor index over a corpus's embeddings.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Embed every document's content and build the index.
    ///
    /// One batch call covers the whole corpus, order preserved. Any
    /// embedding failure fails the whole build; there is no partial index.
    /// An empty corpus yields an empty index, not an error.
    pub async fn build(corpus: &Corpus, provider: &dyn EmbeddingProvider) -> AppResult<Self> {
        if corpus.is_empty() {
            return Ok(Self {
                entries: Vec::new(),
            });
        }

        let texts: Vec<String> = corpus
            .documents()
            .iter()
            .map(|d| d.content.clone())
            .collect();

        let embeddings = provider.embed_batch(&texts).await?;

        if embeddings.len() != texts.len() {
            return Err(AppError::Embedding(format!(
                "Provider returned {} embeddings for {} documents",
                embeddings.len(),
                texts.len()
            )));
        }

        let entries = embeddings
            .into_iter()
            .enumerate()
            .map(|(position, embedding)| IndexEntry {
                position,
                embedding,
            })
            .collect();

        Ok(Self { entries })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return up to `min(top_k, len)` corpus positions ranked by descending
    /// cosine similarity to the query vector.
    ///
    /// Never errors: an empty index or an oversized `top_k` just shortens
    /// the result. The sort is stable, so equal scores keep corpus order.
    pub fn query(&self, query_embedding: &[f32], top_k: usize) -> Vec<(usize, f32)> {
        let mut results: Vec<(usize, f32)> = self
            .entries
            .iter()
            .map(|entry| {
                (
                    entry.position,
                    cosine_similarity(query_embedding, &entry.embedding),
                )
            })
            .collect();

        results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        tracing::debug!(
            "Retrieved {} documents (requested top-{})",
            results.len(),
            top_k
        );

        results
    }
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 on length mismatch or zero-norm input rather than erroring;
/// a degenerate vector simply ranks last.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::build_corpus;
    use crate::types::Article;
    use newsdesk_core::AppResult;

    fn article(title: &str, summary: &str) -> Article {
        Article {
            title: title.to_string(),
            link: format!("https://example.com/{}", title.to_lowercase()),
            source: "Test Wire".to_string(),
            summary: summary.to_string(),
            snippet: String::new(),
        }
    }

    /// Embeds into a two-dimensional space: texts mentioning EVs point one
    /// way, everything else points the other.
    #[derive(Debug)]
    struct TopicEmbedder;

    #[async_trait::async_trait]
    impl EmbeddingProvider for TopicEmbedder {
        fn provider_name(&self) -> &str {
            "topic-stub"
        }

        fn model_name(&self) -> &str {
            "topic-v0"
        }

        fn dimensions(&self) -> usize {
            2
        }

        async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    if t.contains("EV") || t.contains("battery") {
                        vec![1.0, 0.0]
                    } else {
                        vec![0.0, 1.0]
                    }
                })
                .collect())
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 0.001);
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 0.001);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_empty_corpus_builds_empty_index() {
        let corpus = build_corpus(&[]);
        let index = VectorIndex::build(&corpus, &TopicEmbedder).await.unwrap();
        assert!(index.is_empty());
        assert!(index.query(&[1.0, 0.0], 5).is_empty());
    }

    #[tokio::test]
    async fn test_top_k_clamped_to_corpus_size() {
        let corpus = build_corpus(&[article("One", "EV news"), article("Two", "other news")]);
        let index = VectorIndex::build(&corpus, &TopicEmbedder).await.unwrap();

        for k in [0usize, 1, 2, 50] {
            let results = index.query(&[1.0, 0.0], k);
            assert_eq!(results.len(), k.min(2));
        }
    }

    #[tokio::test]
    async fn test_ev_documents_rank_ahead() {
        // Four documents, two about EVs; an EV question with k=2 must pick
        // exactly the EV pair, in corpus order (their scores tie).
        let corpus = build_corpus(&[
            article("Nvidia earnings", "Record data center revenue."),
            article("EV tax credits", "Credits extended for EV buyers."),
            article("AI regulation", "New rules proposed."),
            article("EV battery tech", "Solid-state battery milestone."),
        ]);

        let index = VectorIndex::build(&corpus, &TopicEmbedder).await.unwrap();
        let question = TopicEmbedder.embed("What's new with EVs?").await.unwrap();
        let results = index.query(&question, 2);

        let positions: Vec<usize> = results.iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_tie_break_keeps_corpus_order() {
        let corpus = build_corpus(&[
            article("A", "EV story one"),
            article("B", "EV story two"),
            article("C", "EV story three"),
        ]);

        let index = VectorIndex::build(&corpus, &TopicEmbedder).await.unwrap();
        let results = index.query(&[1.0, 0.0], 3);

        let positions: Vec<usize> = results.iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_build_fails_when_embedding_fails() {
        #[derive(Debug)]
        struct BrokenEmbedder;

        #[async_trait::async_trait]
        impl EmbeddingProvider for BrokenEmbedder {
            fn provider_name(&self) -> &str {
                "broken"
            }
            fn model_name(&self) -> &str {
                "broken-v0"
            }
            fn dimensions(&self) -> usize {
                2
            }
            async fn embed_batch(&self, _texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
                Err(newsdesk_core::AppError::Embedding("offline".to_string()))
            }
        }

        let corpus = build_corpus(&[article("One", "summary")]);
        let result = VectorIndex::build(&corpus, &BrokenEmbedder).await;
        assert!(result.is_err());
    }
}
