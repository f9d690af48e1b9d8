//! Probing question generation.

use crate::parse::parse_string_list;
use newsdesk_core::{AppError, AppResult};
use newsdesk_llm::{LlmClient, LlmRequest};
use newsdesk_prompt::{PromptRegistry, PROBING_QUESTIONS};
use serde_json::json;

/// Questions used when the model's output cannot be parsed as a list.
pub const FALLBACK_QUESTIONS: [&str; 3] = [
    "Could you be more specific about the topics?",
    "Are there any particular companies or people to follow?",
    "Which regions are you most interested in?",
];

/// Generate 3-4 clarifying questions from an interest description.
///
/// Unparseable model output falls back to [`FALLBACK_QUESTIONS`]; a failed
/// generation call is an error.
pub async fn generate_probing_questions(
    llm: &dyn LlmClient,
    model: &str,
    prompts: &PromptRegistry,
    interest_text: &str,
) -> AppResult<Vec<String>> {
    let interest_text = interest_text.trim();
    if interest_text.is_empty() {
        return Err(AppError::Feed(
            "Interest description cannot be empty".to_string(),
        ));
    }

    let prompt = prompts.render(PROBING_QUESTIONS, &json!({ "interest_text": interest_text }))?;
    let request = LlmRequest::new(prompt, model).with_temperature(0.7);
    let response = llm.complete(&request).await?;

    match parse_string_list(&response.content) {
        Some(questions) if !questions.is_empty() => {
            tracing::info!("Generated {} probing questions", questions.len());
            Ok(questions)
        }
        _ => {
            tracing::warn!("Could not parse question list, using fallback questions");
            Ok(FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_llm::{LlmResponse, LlmUsage};

    struct FixedLlm(String);

    #[async_trait::async_trait]
    impl LlmClient for FixedLlm {
        fn provider_name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            Ok(LlmResponse {
                content: self.0.clone(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
                done: true,
            })
        }
    }

    #[tokio::test]
    async fn test_parses_json_array_of_questions() {
        let llm = FixedLlm(r#"["Which companies?", "Which regions?"]"#.to_string());
        let prompts = PromptRegistry::new().unwrap();

        let questions = generate_probing_questions(&llm, "m", &prompts, "EV news")
            .await
            .unwrap();
        assert_eq!(questions, vec!["Which companies?", "Which regions?"]);
    }

    #[tokio::test]
    async fn test_unparseable_output_falls_back() {
        let llm = FixedLlm("I cannot answer in that format.".to_string());
        let prompts = PromptRegistry::new().unwrap();

        let questions = generate_probing_questions(&llm, "m", &prompts, "EV news")
            .await
            .unwrap();
        assert_eq!(questions.len(), FALLBACK_QUESTIONS.len());
        assert_eq!(questions[0], FALLBACK_QUESTIONS[0]);
    }

    #[tokio::test]
    async fn test_empty_array_falls_back() {
        let llm = FixedLlm("[]".to_string());
        let prompts = PromptRegistry::new().unwrap();

        let questions = generate_probing_questions(&llm, "m", &prompts, "EV news")
            .await
            .unwrap();
        assert_eq!(questions.len(), FALLBACK_QUESTIONS.len());
    }

    #[tokio::test]
    async fn test_empty_interest_rejected() {
        let llm = FixedLlm("[]".to_string());
        let prompts = PromptRegistry::new().unwrap();

        let result = generate_probing_questions(&llm, "m", &prompts, "   ").await;
        assert!(result.is_err());
    }
}
