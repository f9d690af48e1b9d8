//! Generate command handler.

use clap::Args;
use newsdesk_core::{config::AppConfig, AppError, AppResult};
use newsdesk_feed::{generate_feed, SerpApiClient};
use newsdesk_prompt::PromptRegistry;
use newsdesk_rag::Article;
use std::path::PathBuf;

/// Generate a personalized news feed from a profile summary
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// The profile summary (alternative to --file)
    pub profile: Option<String>,

    /// Read the profile summary from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Target language (ISO 639-1), defaults to the configured language
    #[arg(short, long)]
    pub language: Option<String>,

    /// Where to write the feed JSON (default: .newsdesk/feed.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing generate command");

        let profile = self
            .get_profile()
            .ok_or_else(|| AppError::Config("No profile summary provided".to_string()))?;

        let search_api_key = config.search_api_key.as_deref().ok_or_else(|| {
            AppError::Config(
                "No search API key configured (set NEWSDESK_SEARCH_API_KEY)".to_string(),
            )
        })?;

        let language = self.language.as_deref().unwrap_or(&config.language);

        let prompts = PromptRegistry::with_overrides(&config.workspace)?;
        let client = super::build_llm_client(config)?;
        let search = SerpApiClient::new(search_api_key);

        let articles = generate_feed(
            client.as_ref(),
            &config.model,
            &prompts,
            &search,
            &profile,
            language,
        )
        .await?;

        self.write_feed(config, &articles)?;

        if self.json {
            let output = serde_json::json!({
                "articleCount": articles.len(),
                "articles": &articles,
                "profileSummary": profile,
            });
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else if articles.is_empty() {
            println!("No news found for this profile.");
        } else {
            for article in &articles {
                println!("{} ({})", article.title, article.source);
                println!("  {}", article.link);
                println!("  {}", article.summary);
                println!();
            }
        }

        Ok(())
    }

    fn get_profile(&self) -> Option<String> {
        self.profile.clone().or_else(|| {
            self.file.as_ref().and_then(|path| {
                std::fs::read_to_string(path)
                    .map_err(|e| tracing::error!("Failed to read profile file: {}", e))
                    .ok()
            })
        })
    }

    /// Persist the feed so `newsdesk ask` can load it later.
    fn write_feed(&self, config: &AppConfig, articles: &[Article]) -> AppResult<()> {
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| config.newsdesk_dir().join("feed.json"));

        let json = serde_json::to_string_pretty(articles)
            .map_err(|e| AppError::Serialization(e.to_string()))?;
        std::fs::write(&path, json)
            .map_err(|e| AppError::Config(format!("Failed to write feed to {:?}: {}", path, e)))?;

        tracing::info!("Wrote {} articles to {:?}", articles.len(), path);
        Ok(())
    }
}
