//! Embedding provider adapters.
//!
//! Text goes in, a fixed-length vector comes out. Providers are stateless
//! adapters around external services (or a deterministic local fallback for
//! tests and offline development). A failed embedding call fails the whole
//! index build; no partial index is ever produced.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
