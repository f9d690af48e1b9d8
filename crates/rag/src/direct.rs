//! Direct full-corpus fallback.
//!
//! When any retrieval stage fails, the entire corpus is placed in the prompt
//! instead. One generation attempt; if that also fails, the caller gets a
//! fixed apology rather than an error.

use crate::answer::finalize_answer;
use crate::types::{Corpus, ANSWER_UNAVAILABLE};
use newsdesk_llm::{LlmClient, LlmRequest};

const FALLBACK_TEMPERATURE: f32 = 0.3;

/// Answer from the full corpus, skipping retrieval.
///
/// Documents are labeled "Article 1" through "Article N" in corpus order.
/// Total function: a generation failure logs and returns the fixed apology.
pub(crate) async fn answer_from_full_corpus(
    llm: &dyn LlmClient,
    model: &str,
    question: &str,
    corpus: &Corpus,
    target_language: &str,
) -> String {
    let context = corpus
        .documents()
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("Article {}:\n{}", i + 1, doc.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = format!(
        "Here is the complete set of articles from the current news feed. \
         Answer the question using only these articles. \
         If the articles do not contain the answer, say so explicitly. \
         Provide the answer in the language with the ISO 639-1 code: '{}'.\n\n\
         {}\n\n\
         Question: \"{}\"\n\n\
         Answer:",
        target_language, context, question
    );

    let request = LlmRequest::new(prompt, model).with_temperature(FALLBACK_TEMPERATURE);

    match llm.complete(&request).await {
        Ok(response) => finalize_answer(response.content),
        Err(e) => {
            tracing::error!("Fallback generation failed: {}", e);
            ANSWER_UNAVAILABLE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::build_corpus;
    use crate::types::Article;
    use newsdesk_core::{AppError, AppResult};
    use newsdesk_llm::{LlmResponse, LlmUsage};

    struct EchoLlm;

    #[async_trait::async_trait]
    impl LlmClient for EchoLlm {
        fn provider_name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            Ok(LlmResponse {
                content: request.prompt.clone(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
                done: true,
            })
        }
    }

    struct DownLlm;

    #[async_trait::async_trait]
    impl LlmClient for DownLlm {
        fn provider_name(&self) -> &str {
            "down"
        }

        async fn complete(&self, _request: &LlmRequest) -> AppResult<LlmResponse> {
            Err(AppError::Llm("connection refused".to_string()))
        }
    }

    fn corpus_of(titles: &[&str]) -> Corpus {
        let articles: Vec<Article> = titles
            .iter()
            .map(|t| Article {
                title: t.to_string(),
                link: format!("https://example.com/{}", t),
                source: "Wire".to_string(),
                summary: format!("Summary of {}.", t),
                snippet: String::new(),
            })
            .collect();
        build_corpus(&articles)
    }

    #[tokio::test]
    async fn test_documents_labeled_in_corpus_order() {
        let corpus = corpus_of(&["alpha", "beta", "gamma"]);
        let answer =
            answer_from_full_corpus(&EchoLlm, "m", "what happened?", &corpus, "en").await;

        let a1 = answer.find("Article 1:").unwrap();
        let a2 = answer.find("Article 2:").unwrap();
        let a3 = answer.find("Article 3:").unwrap();
        assert!(a1 < a2 && a2 < a3);
        assert!(answer.contains("Title: alpha"));
        assert!(answer.contains("Title: gamma"));
    }

    #[tokio::test]
    async fn test_language_directive_present() {
        let corpus = corpus_of(&["alpha"]);
        let answer = answer_from_full_corpus(&EchoLlm, "m", "q?", &corpus, "de").await;
        assert!(answer.contains("ISO 639-1 code: 'de'"));
    }

    #[tokio::test]
    async fn test_generation_failure_returns_apology() {
        let corpus = corpus_of(&["alpha"]);
        let answer = answer_from_full_corpus(&DownLlm, "m", "q?", &corpus, "en").await;
        assert_eq!(answer, ANSWER_UNAVAILABLE);
    }
}
