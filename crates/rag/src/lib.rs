//! Retrieval-augmented question answering over an ephemeral news corpus.
//!
//! This crate indexes the current generation of news articles into in-memory
//! vector embeddings and answers natural-language questions against them.
//! The corpus lives only for the duration of one [`NewsAnswerer::answer`]
//! call; nothing is persisted and no index is shared across calls.
//!
//! When the vector path is unavailable (embedding, index build, or retrieval
//! fails), answering degrades to a direct full-corpus prompt so every
//! question still receives an answer.

pub mod answer;
pub mod direct;
pub mod embeddings;
pub mod index;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use answer::NewsAnswerer;
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use index::VectorIndex;
pub use store::build_corpus;
pub use types::{
    Article, Corpus, Document, DocumentMetadata, ANSWER_UNAVAILABLE, EMPTY_QUESTION,
    FEED_NOT_GENERATED, NO_RELEVANT_INFO,
};
