//! Ask command handler.
//!
//! Answers a question against a previously generated feed.

use clap::Args;
use newsdesk_core::{config::AppConfig, AppError, AppResult};
use newsdesk_rag::{create_provider, Article, EmbeddingConfig, NewsAnswerer};
use std::path::PathBuf;

/// Ask a question about a generated news feed
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Feed JSON file (default: .newsdesk/feed.json)
    #[arg(short, long)]
    pub feed: Option<PathBuf>,

    /// Target language (ISO 639-1), defaults to the configured language
    #[arg(short, long)]
    pub language: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let articles = self.load_feed(config)?;
        let language = self.language.as_deref().unwrap_or(&config.language);

        let client = super::build_llm_client(config)?;

        let embedding_config = EmbeddingConfig {
            provider: config.embedding_provider.clone(),
            model: config.embedding_model.clone(),
            dimensions: config.embedding_dimensions,
            ..Default::default()
        };
        let embedder = create_provider(&embedding_config)?;

        let answerer = NewsAnswerer::new(client, embedder, &config.model);
        let answer = answerer.answer(&self.question, &articles, language).await;

        if self.json {
            let output = serde_json::json!({
                "answer": answer,
                "model": config.model,
                "provider": config.provider,
            });
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }

    /// Load the feed written by `newsdesk generate`. A missing feed file is
    /// an empty feed; the answerer reports it as not generated yet.
    fn load_feed(&self, config: &AppConfig) -> AppResult<Vec<Article>> {
        let path = self
            .feed
            .clone()
            .unwrap_or_else(|| config.newsdesk_dir().join("feed.json"));

        if !path.exists() {
            tracing::debug!("No feed file at {:?}", path);
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("Failed to read feed {:?}: {}", path, e)))?;
        let articles: Vec<Article> = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse feed {:?}: {}", path, e)))?;

        Ok(articles)
    }
}
