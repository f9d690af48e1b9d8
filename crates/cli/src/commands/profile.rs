//! Profile command handler.

use clap::Args;
use newsdesk_core::{config::AppConfig, AppError, AppResult};
use newsdesk_feed::summarize_user_profile;
use newsdesk_prompt::PromptRegistry;
use std::path::PathBuf;

/// Build a profile summary from an interest and question answers
#[derive(Args, Debug)]
pub struct ProfileCommand {
    /// The interest description
    pub interest: String,

    /// A question answer as "question=answer" (repeatable)
    #[arg(short, long = "answer")]
    pub answers: Vec<String>,

    /// Read answers from a JSON file ({"question": "answer", ...})
    #[arg(long)]
    pub answers_file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ProfileCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing profile command");

        let answers = self.collect_answers()?;

        let prompts = PromptRegistry::with_overrides(&config.workspace)?;
        let client = super::build_llm_client(config)?;

        let summary = summarize_user_profile(
            client.as_ref(),
            &config.model,
            &prompts,
            &self.interest,
            &answers,
        )
        .await?;

        if self.json {
            let output = serde_json::json!({ "profileSummary": summary });
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", summary);
        }

        Ok(())
    }

    fn collect_answers(&self) -> AppResult<Vec<(String, String)>> {
        let mut answers = Vec::new();

        if let Some(ref path) = self.answers_file {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read answers file {:?}: {}", path, e))
            })?;
            let map: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&contents).map_err(|e| {
                    AppError::Config(format!("Failed to parse answers file {:?}: {}", path, e))
                })?;
            for (question, answer) in map {
                let answer = answer.as_str().unwrap_or_default().to_string();
                answers.push((question, answer));
            }
        }

        for pair in &self.answers {
            let Some((question, answer)) = pair.split_once('=') else {
                return Err(AppError::Config(format!(
                    "Invalid answer format (expected question=answer): {}",
                    pair
                )));
            };
            answers.push((question.trim().to_string(), answer.trim().to_string()));
        }

        Ok(answers)
    }
}
