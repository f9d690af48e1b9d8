//! Questions command handler.

use clap::Args;
use newsdesk_core::{config::AppConfig, AppError, AppResult};
use newsdesk_feed::generate_probing_questions;
use newsdesk_prompt::PromptRegistry;
use std::path::PathBuf;

/// Generate clarifying questions from an interest description
#[derive(Args, Debug)]
pub struct QuestionsCommand {
    /// The interest description (alternative to --file)
    pub interest: Option<String>,

    /// Read the interest description from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl QuestionsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing questions command");

        let interest = self
            .get_interest()
            .ok_or_else(|| AppError::Config("No interest description provided".to_string()))?;

        let prompts = PromptRegistry::with_overrides(&config.workspace)?;
        let client = super::build_llm_client(config)?;

        let questions =
            generate_probing_questions(client.as_ref(), &config.model, &prompts, &interest)
                .await?;

        if self.json {
            let output = serde_json::json!({ "questions": questions });
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            for (i, question) in questions.iter().enumerate() {
                println!("{}. {}", i + 1, question);
            }
        }

        Ok(())
    }

    fn get_interest(&self) -> Option<String> {
        self.interest.clone().or_else(|| {
            self.file.as_ref().and_then(|path| {
                std::fs::read_to_string(path)
                    .map_err(|e| tracing::error!("Failed to read interest file: {}", e))
                    .ok()
            })
        })
    }
}
