//! Profile summarization.

use newsdesk_core::{AppError, AppResult};
use newsdesk_llm::{LlmClient, LlmRequest};
use newsdesk_prompt::{PromptRegistry, PROFILE_SUMMARY};
use serde_json::json;

/// Condense an interest description and question answers into a
/// one-paragraph profile suitable for keyword generation.
///
/// Answers are rendered as a "- question: answer" bullet list in the order
/// given. An empty model response is an error; downstream stages need a
/// non-empty profile.
pub async fn summarize_user_profile(
    llm: &dyn LlmClient,
    model: &str,
    prompts: &PromptRegistry,
    initial_interest: &str,
    answers: &[(String, String)],
) -> AppResult<String> {
    let initial_interest = initial_interest.trim();
    if initial_interest.is_empty() {
        return Err(AppError::Feed(
            "Interest description cannot be empty".to_string(),
        ));
    }

    let answers_text = answers
        .iter()
        .map(|(question, answer)| format!("- {}: {}", question, answer))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = prompts.render(
        PROFILE_SUMMARY,
        &json!({
            "initial_interest": initial_interest,
            "answers": answers_text,
        }),
    )?;

    let request = LlmRequest::new(prompt, model).with_temperature(0.7);
    let response = llm.complete(&request).await?;

    let summary = response.content.trim().to_string();
    if summary.is_empty() {
        return Err(AppError::Feed(
            "Profile summarization produced an empty result".to_string(),
        ));
    }

    tracing::info!("Created profile summary ({} chars)", summary.len());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
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

    struct BlankLlm;

    #[async_trait::async_trait]
    impl LlmClient for BlankLlm {
        fn provider_name(&self) -> &str {
            "blank"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            Ok(LlmResponse {
                content: "   ".to_string(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
                done: true,
            })
        }
    }

    #[tokio::test]
    async fn test_answers_rendered_as_bullets_in_order() {
        let prompts = PromptRegistry::new().unwrap();
        let answers = vec![
            ("Which companies?".to_string(), "Tesla and BYD".to_string()),
            ("Which regions?".to_string(), "Europe".to_string()),
        ];

        let summary = summarize_user_profile(&EchoLlm, "m", &prompts, "EV news", &answers)
            .await
            .unwrap();

        let first = summary.find("- Which companies?: Tesla and BYD").unwrap();
        let second = summary.find("- Which regions?: Europe").unwrap();
        assert!(first < second);
        assert!(summary.contains("\"EV news\""));
    }

    #[tokio::test]
    async fn test_empty_response_is_error() {
        let prompts = PromptRegistry::new().unwrap();
        let result = summarize_user_profile(&BlankLlm, "m", &prompts, "EV news", &[]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_interest_rejected() {
        let prompts = PromptRegistry::new().unwrap();
        let result = summarize_user_profile(&EchoLlm, "m", &prompts, "", &[]).await;
        assert!(result.is_err());
    }
}
