//! Prompt templates for the newsdesk pipeline.
//!
//! Built-in Handlebars templates cover the feed pipeline's LLM calls;
//! a workspace can override any of them with `.newsdesk/prompts/<id>.hbs`.

pub mod registry;
pub mod templates;

// Re-export main types
pub use registry::PromptRegistry;
pub use templates::{
    ARTICLE_SUMMARY, BUILTIN_IDS, PROBING_QUESTIONS, PROFILE_SUMMARY, SEARCH_QUERIES,
};
