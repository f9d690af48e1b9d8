//! Feed pipeline: interest onboarding, profile synthesis, news search,
//! per-article summarization, and in-memory session storage.

pub mod generate;
pub mod parse;
pub mod profile;
pub mod questions;
pub mod search;
pub mod session;

// Re-export main types
pub use generate::generate_feed;
pub use parse::parse_string_list;
pub use profile::summarize_user_profile;
pub use questions::generate_probing_questions;
pub use search::{NewsSearchProvider, NewsSearchResult, SerpApiClient};
pub use session::{SessionId, SessionStore, StoredFeed};
