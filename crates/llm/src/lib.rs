//! Generation provider adapters for Newsdesk.
//!
//! This crate provides a provider-agnostic abstraction for text generation.
//! It supports multiple providers through a unified trait-based interface;
//! the rest of the workspace only ever sees `Arc<dyn LlmClient>`, so tests
//! substitute deterministic stubs at the same seam.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - Future: Gemini, OpenAI
//!
//! # Example
//! ```no_run
//! use newsdesk_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("Hello, world!", "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::OllamaClient;
