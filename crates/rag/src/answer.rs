//! Retrieval-augmented answering orchestration.
//!
//! Per call: build corpus → build index → retrieve top-k → synthesize an
//! answer from only the retrieved context. Every stage failure is an
//! explicit value, not a propagated exception, and routes to the
//! direct-context fallback so the caller always receives text.

use crate::direct;
use crate::embeddings::EmbeddingProvider;
use crate::index::VectorIndex;
use crate::store::build_corpus;
use crate::types::{Article, Corpus, EMPTY_QUESTION, FEED_NOT_GENERATED, NO_RELEVANT_INFO};
use newsdesk_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

/// Documents retrieved per question, clamped to the corpus size.
const TOP_K: usize = 3;

/// Temperature for answer synthesis; low, for factual answers.
const ANSWER_TEMPERATURE: f32 = 0.3;

/// Where the retrieval path gave up. The answerer branches on this to pick
/// the fallback; it never reaches a caller.
#[derive(Debug, thiserror::Error)]
pub(crate) enum StageError {
    #[error("indexing failed: {0}")]
    Indexing(String),

    #[error("retrieval failed: {0}")]
    Retrieval(String),

    #[error("generation failed: {0}")]
    Generation(String),
}

/// Answers questions against the current news corpus.
///
/// Providers are injected at construction so tests can substitute
/// deterministic stubs. The answerer holds no per-question state; concurrent
/// calls are independent and each builds its own index.
pub struct NewsAnswerer {
    llm: Arc<dyn LlmClient>,
    embedder: Arc<dyn EmbeddingProvider>,
    model: String,
}

impl NewsAnswerer {
    /// Create an answerer from injected provider adapters.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        embedder: Arc<dyn EmbeddingProvider>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            embedder,
            model: model.into(),
        }
    }

    /// Answer a question against the supplied articles.
    ///
    /// Total function: always returns text, never an error. The target
    /// language is an ISO 639-1 code injected verbatim into the prompt;
    /// it is not validated here.
    pub async fn answer(
        &self,
        question: &str,
        articles: &[Article],
        target_language: &str,
    ) -> String {
        let question = question.trim();
        if question.is_empty() {
            return EMPTY_QUESTION.to_string();
        }

        let corpus = build_corpus(articles);
        if corpus.is_empty() {
            return FEED_NOT_GENERATED.to_string();
        }

        tracing::info!(
            "Answering question against {} documents (language: {})",
            corpus.len(),
            target_language
        );

        match self
            .answer_with_retrieval(question, &corpus, target_language)
            .await
        {
            Ok(text) => finalize_answer(text),
            Err(stage) => {
                tracing::warn!("Retrieval path unavailable ({}), using full corpus", stage);
                direct::answer_from_full_corpus(
                    self.llm.as_ref(),
                    &self.model,
                    question,
                    &corpus,
                    target_language,
                )
                .await
            }
        }
    }

    /// The happy path: Indexing → Retrieving → Synthesizing.
    async fn answer_with_retrieval(
        &self,
        question: &str,
        corpus: &Corpus,
        target_language: &str,
    ) -> Result<String, StageError> {
        // Indexing
        let index = VectorIndex::build(corpus, self.embedder.as_ref())
            .await
            .map_err(|e| StageError::Indexing(e.to_string()))?;

        // Retrieving
        let question_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(|e| StageError::Retrieval(e.to_string()))?;

        let top_k = TOP_K.min(corpus.len());
        let ranked = index.query(&question_embedding, top_k);
        if ranked.is_empty() {
            return Err(StageError::Retrieval(
                "no documents retrieved".to_string(),
            ));
        }

        tracing::debug!(
            "Retrieved {} documents (best score: {:.3})",
            ranked.len(),
            ranked[0].1
        );

        // Synthesizing
        let context = build_context(corpus, &ranked);
        let prompt = build_answer_prompt(question, &context, target_language);
        let request = LlmRequest::new(prompt, &self.model).with_temperature(ANSWER_TEMPERATURE);

        let response = self
            .llm
            .complete(&request)
            .await
            .map_err(|e| StageError::Generation(e.to_string()))?;

        Ok(response.content)
    }
}

/// Concatenate retrieved documents in ranked order.
fn build_context(corpus: &Corpus, ranked: &[(usize, f32)]) -> String {
    ranked
        .iter()
        .filter_map(|(position, _score)| corpus.get(*position))
        .map(|doc| doc.content.clone())
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Assemble the synthesis prompt: instructions, language directive, ranked
/// context, literal question.
fn build_answer_prompt(question: &str, context: &str, target_language: &str) -> String {
    format!(
        "Based on the provided news context, answer the following question. \
         Use only the information in the context. \
         Provide the answer in the language with the ISO 639-1 code: '{}'.\n\n\
         News context:\n{}\n\n\
         Question: \"{}\"\n\n\
         Answer:",
        target_language, context, question
    )
}

/// Trim provider output; an empty result becomes the fixed no-information
/// message rather than an empty string.
pub(crate) fn finalize_answer(text: String) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        NO_RELEVANT_INFO.to_string()
    } else {
        trimmed.to_string()
    }
}
