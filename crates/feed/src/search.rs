//! News search over the SerpAPI Google News endpoint.

use newsdesk_core::{AppError, AppResult};
use std::time::Duration;

const SEARCH_ENDPOINT: &str = "https://serpapi.com/search";
const RESULTS_PER_QUERY: u32 = 5;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// One raw news hit as returned by the search provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSearchResult {
    pub title: String,
    pub link: String,
    pub source: String,
    pub snippet: String,
}

/// A provider of news search results for one query.
#[async_trait::async_trait]
pub trait NewsSearchProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    async fn search_news(&self, query: &str) -> AppResult<Vec<NewsSearchResult>>;
}

/// SerpAPI client querying Google News (`tbm=nws`).
pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, SEARCH_ENDPOINT)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn parse_results(body: &serde_json::Value) -> Vec<NewsSearchResult> {
        let Some(items) = body.get("news_results").and_then(|v| v.as_array()) else {
            return Vec::new();
        };

        items
            .iter()
            .map(|item| NewsSearchResult {
                title: string_field(item, "title"),
                link: string_field(item, "link"),
                source: source_field(item),
                snippet: string_field(item, "snippet"),
            })
            .collect()
    }
}

fn string_field(item: &serde_json::Value, key: &str) -> String {
    item.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

// The source field is a plain string in older responses and an object with
// a "name" key in newer ones.
fn source_field(item: &serde_json::Value) -> String {
    match item.get("source") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(obj) => obj
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        None => String::new(),
    }
}

#[async_trait::async_trait]
impl NewsSearchProvider for SerpApiClient {
    fn provider_name(&self) -> &str {
        "serpapi"
    }

    async fn search_news(&self, query: &str) -> AppResult<Vec<NewsSearchResult>> {
        tracing::debug!("Searching news for query: '{}'", query);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("q", query),
                ("tbm", "nws"),
                ("num", &RESULTS_PER_QUERY.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Search(format!(
                "Search API returned status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to decode search response: {}", e)))?;

        let results = Self::parse_results(&body);
        tracing::debug!("Query '{}' returned {} results", query, results.len());
        Ok(results)
    }
}
