//! In-memory storage of generated feeds.

use chrono::{DateTime, Utc};
use newsdesk_rag::Article;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Opaque handle for a stored feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A generated feed plus the inputs it was generated from.
#[derive(Debug, Clone)]
pub struct StoredFeed {
    pub profile_summary: String,
    pub language: String,
    pub articles: Vec<Article>,
    pub created_at: DateTime<Utc>,
}

impl StoredFeed {
    pub fn new(
        profile_summary: impl Into<String>,
        language: impl Into<String>,
        articles: Vec<Article>,
    ) -> Self {
        Self {
            profile_summary: profile_summary.into(),
            language: language.into(),
            articles,
            created_at: Utc::now(),
        }
    }
}

/// Process-local feed storage.
///
/// Feeds live only as long as the process; `latest` is recency by insertion
/// timestamp, never by feed size or key ordering.
#[derive(Default)]
pub struct SessionStore {
    feeds: RwLock<HashMap<SessionId, StoredFeed>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a feed and return its new handle.
    pub async fn insert(&self, feed: StoredFeed) -> SessionId {
        let id = SessionId::generate();
        self.feeds.write().await.insert(id, feed);
        tracing::debug!("Stored feed session {}", id);
        id
    }

    pub async fn get(&self, id: &SessionId) -> Option<StoredFeed> {
        self.feeds.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &SessionId) -> Option<StoredFeed> {
        self.feeds.write().await.remove(id)
    }

    /// The most recently created feed.
    pub async fn latest(&self) -> Option<(SessionId, StoredFeed)> {
        self.feeds
            .read()
            .await
            .iter()
            .max_by_key(|(_, feed)| feed.created_at)
            .map(|(id, feed)| (*id, feed.clone()))
    }

    pub async fn len(&self) -> usize {
        self.feeds.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.feeds.read().await.is_empty()
    }
}
