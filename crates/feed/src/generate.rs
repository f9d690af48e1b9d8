//! Feed generation: keyword derivation, news search, per-article
//! summarization and translation.

use crate::parse::parse_string_list;
use crate::search::{NewsSearchProvider, NewsSearchResult};
use newsdesk_core::{AppError, AppResult};
use newsdesk_llm::{LlmClient, LlmRequest};
use newsdesk_prompt::{PromptRegistry, ARTICLE_SUMMARY, SEARCH_QUERIES};
use newsdesk_rag::Article;
use serde_json::json;
use std::collections::HashSet;

/// Search queries issued per feed, including the appended profile summary.
const MAX_QUERIES: usize = 4;

/// Articles kept per feed after summarization.
const MAX_ARTICLES: usize = 4;

/// Marker used by news sources for withdrawn content.
const REMOVED_MARKER: &str = "[Removed]";

const PLACEHOLDER_TITLE: &str = "No Title";
const PLACEHOLDER_SOURCE: &str = "Unknown";
const PLACEHOLDER_LINK: &str = "#";

/// Generate a personalized news feed from a profile summary.
///
/// Derives up to three search keywords from the profile, appends the
/// profile itself as a final query, searches each, then summarizes and
/// translates the first [`MAX_ARTICLES`] usable hits. A query whose search
/// fails is skipped; no usable hits at all yields an empty feed, not an
/// error.
pub async fn generate_feed(
    llm: &dyn LlmClient,
    model: &str,
    prompts: &PromptRegistry,
    search: &dyn NewsSearchProvider,
    profile_summary: &str,
    target_language: &str,
) -> AppResult<Vec<Article>> {
    let profile_summary = profile_summary.trim();
    if profile_summary.is_empty() {
        return Err(AppError::Feed(
            "Profile summary cannot be empty".to_string(),
        ));
    }

    let queries = derive_queries(llm, model, prompts, profile_summary).await?;
    let hits = collect_hits(search, &queries).await;

    if hits.is_empty() {
        tracing::warn!("No news found after trying all queries");
        return Ok(Vec::new());
    }

    summarize_hits(llm, model, prompts, &hits, target_language).await
}

/// Keywords from the model plus the profile summary itself, capped at
/// [`MAX_QUERIES`]. Unparseable model output falls back to the profile
/// alone.
async fn derive_queries(
    llm: &dyn LlmClient,
    model: &str,
    prompts: &PromptRegistry,
    profile_summary: &str,
) -> AppResult<Vec<String>> {
    let prompt = prompts.render(SEARCH_QUERIES, &json!({ "profile_summary": profile_summary }))?;
    let request = LlmRequest::new(prompt, model).with_temperature(0.7);
    let response = llm.complete(&request).await?;

    let mut queries = match parse_string_list(&response.content) {
        Some(list) if !list.is_empty() => list,
        _ => {
            tracing::warn!("Could not parse keyword list, searching with profile summary only");
            vec![profile_summary.to_string()]
        }
    };

    if !queries.iter().any(|q| q == profile_summary) {
        queries.push(profile_summary.to_string());
    }
    queries.truncate(MAX_QUERIES);

    Ok(queries)
}

/// Run every query, deduplicate hits by link, skip failed queries.
async fn collect_hits(
    search: &dyn NewsSearchProvider,
    queries: &[String],
) -> Vec<NewsSearchResult> {
    let mut hits = Vec::new();
    let mut seen_links: HashSet<String> = HashSet::new();

    for query in queries {
        tracing::info!("Searching for news with query: '{}'", query);

        let results = match search.search_news(query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("Search failed for query '{}': {}", query, e);
                continue;
            }
        };

        for result in results {
            if result.link.is_empty() || !seen_links.insert(result.link.clone()) {
                continue;
            }
            hits.push(result);
        }
    }

    hits
}

/// Summarize and translate hits in order until [`MAX_ARTICLES`] are kept.
///
/// Hits with no usable description, or withdrawn ones, are skipped before
/// any generation call is spent on them. A summarization failure skips that
/// hit, not the feed.
async fn summarize_hits(
    llm: &dyn LlmClient,
    model: &str,
    prompts: &PromptRegistry,
    hits: &[NewsSearchResult],
    target_language: &str,
) -> AppResult<Vec<Article>> {
    let mut articles = Vec::new();

    for hit in hits {
        let description = if hit.snippet.trim().is_empty() {
            hit.title.trim()
        } else {
            hit.snippet.trim()
        };

        if description.is_empty() || description.contains(REMOVED_MARKER) {
            continue;
        }

        let prompt = prompts.render(
            ARTICLE_SUMMARY,
            &json!({
                "article_description": description,
                "target_language": target_language,
            }),
        )?;
        let request = LlmRequest::new(prompt, model).with_temperature(0.3);
        let response = match llm.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Summarization failed for '{}': {}", hit.link, e);
                continue;
            }
        };

        articles.push(Article {
            title: non_empty_or(&hit.title, PLACEHOLDER_TITLE),
            link: non_empty_or(&hit.link, PLACEHOLDER_LINK),
            source: non_empty_or(&hit.source, PLACEHOLDER_SOURCE),
            summary: response.content.trim().to_string(),
            snippet: description.to_string(),
        });

        if articles.len() >= MAX_ARTICLES {
            break;
        }
    }

    tracing::info!("Generated feed with {} articles", articles.len());
    Ok(articles)
}

fn non_empty_or(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_llm::{LlmResponse, LlmUsage};
    use std::sync::Mutex;

    /// Replies with a keyword list on the first call, then echoes the
    /// prompt for summarization calls.
    struct ScriptedLlm {
        first_reply: String,
        calls: Mutex<usize>,
    }

    impl ScriptedLlm {
        fn new(first_reply: &str) -> Self {
            Self {
                first_reply: first_reply.to_string(),
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for ScriptedLlm {
        fn provider_name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            let content = if *calls == 1 {
                self.first_reply.clone()
            } else {
                format!("summary of: {}", request.prompt)
            };
            Ok(LlmResponse {
                content,
                model: request.model.clone(),
                usage: LlmUsage::default(),
                done: true,
            })
        }
    }

    /// Records queries; serves canned hits per query, errors on demand.
    struct StubSearch {
        queries: Mutex<Vec<String>>,
        hits: Vec<NewsSearchResult>,
        fail_queries: Vec<String>,
    }

    impl StubSearch {
        fn serving(hits: Vec<NewsSearchResult>) -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
                hits,
                fail_queries: Vec::new(),
            }
        }

        fn seen_queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl NewsSearchProvider for StubSearch {
        fn provider_name(&self) -> &str {
            "stub"
        }

        async fn search_news(&self, query: &str) -> AppResult<Vec<NewsSearchResult>> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail_queries.iter().any(|q| q == query) {
                return Err(AppError::Search("stub outage".to_string()));
            }
            Ok(self.hits.clone())
        }
    }

    fn hit(title: &str, link: &str, snippet: &str) -> NewsSearchResult {
        NewsSearchResult {
            title: title.to_string(),
            link: link.to_string(),
            source: "Wire".to_string(),
            snippet: snippet.to_string(),
        }
    }

    #[tokio::test]
    async fn test_profile_appended_and_queries_capped() {
        let llm = ScriptedLlm::new(r#"["kw1", "kw2", "kw3"]"#);
        let search = StubSearch::serving(vec![]);
        let prompts = PromptRegistry::new().unwrap();

        generate_feed(&llm, "m", &prompts, &search, "ev profile", "en")
            .await
            .unwrap();

        let queries = search.seen_queries();
        assert_eq!(queries, vec!["kw1", "kw2", "kw3", "ev profile"]);
    }

    #[tokio::test]
    async fn test_unparseable_keywords_fall_back_to_profile() {
        let llm = ScriptedLlm::new("no list here");
        let search = StubSearch::serving(vec![]);
        let prompts = PromptRegistry::new().unwrap();

        generate_feed(&llm, "m", &prompts, &search, "ev profile", "en")
            .await
            .unwrap();

        assert_eq!(search.seen_queries(), vec!["ev profile"]);
    }

    #[tokio::test]
    async fn test_duplicate_links_deduplicated() {
        let llm = ScriptedLlm::new(r#"["kw1"]"#);
        let search = StubSearch::serving(vec![
            hit("A", "https://example.com/a", "about A"),
            hit("A again", "https://example.com/a", "about A again"),
        ]);
        let prompts = PromptRegistry::new().unwrap();

        let articles = generate_feed(&llm, "m", &prompts, &search, "profile", "en")
            .await
            .unwrap();

        // Both hits share a link and both queries repeat them.
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "A");
    }

    #[tokio::test]
    async fn test_removed_and_empty_snippets_skipped() {
        let llm = ScriptedLlm::new(r#"["kw1"]"#);
        let search = StubSearch::serving(vec![
            hit("Withdrawn", "https://example.com/w", "[Removed] by publisher"),
            hit("", "https://example.com/blank", "   "),
            hit("Kept", "https://example.com/k", "real snippet"),
        ]);
        let prompts = PromptRegistry::new().unwrap();

        let articles = generate_feed(&llm, "m", &prompts, &search, "profile", "en")
            .await
            .unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Kept");
        // One keyword call plus one summarization call.
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_title_used_when_snippet_missing() {
        let llm = ScriptedLlm::new(r#"["kw1"]"#);
        let search = StubSearch::serving(vec![hit(
            "Battery plant opens",
            "https://example.com/b",
            "",
        )]);
        let prompts = PromptRegistry::new().unwrap();

        let articles = generate_feed(&llm, "m", &prompts, &search, "profile", "en")
            .await
            .unwrap();

        assert_eq!(articles[0].snippet, "Battery plant opens");
    }

    #[tokio::test]
    async fn test_feed_capped_at_four_articles() {
        let llm = ScriptedLlm::new(r#"["kw1"]"#);
        let hits = (0..6)
            .map(|i| {
                hit(
                    &format!("Article {}", i),
                    &format!("https://example.com/{}", i),
                    &format!("snippet {}", i),
                )
            })
            .collect();
        let search = StubSearch::serving(hits);
        let prompts = PromptRegistry::new().unwrap();

        let articles = generate_feed(&llm, "m", &prompts, &search, "profile", "en")
            .await
            .unwrap();

        assert_eq!(articles.len(), MAX_ARTICLES);
    }

    #[tokio::test]
    async fn test_failed_query_skipped_not_fatal() {
        let llm = ScriptedLlm::new(r#"["down"]"#);
        let search = StubSearch {
            queries: Mutex::new(Vec::new()),
            hits: vec![hit("Up", "https://example.com/up", "snippet")],
            fail_queries: vec!["down".to_string()],
        };
        let prompts = PromptRegistry::new().unwrap();

        let articles = generate_feed(&llm, "m", &prompts, &search, "profile", "en")
            .await
            .unwrap();

        // The "down" query fails; the profile query still serves hits.
        assert_eq!(articles.len(), 1);
        assert_eq!(search.seen_queries(), vec!["down", "profile"]);
    }

    /// Errors on exactly one call index (1-based), otherwise behaves like
    /// [`ScriptedLlm`].
    struct FlakyLlm {
        first_reply: String,
        fail_on_call: usize,
        calls: Mutex<usize>,
    }

    #[async_trait::async_trait]
    impl LlmClient for FlakyLlm {
        fn provider_name(&self) -> &str {
            "flaky"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            if *calls == self.fail_on_call {
                return Err(AppError::Llm("flaky outage".to_string()));
            }
            let content = if *calls == 1 {
                self.first_reply.clone()
            } else {
                format!("summary of: {}", request.prompt)
            };
            Ok(LlmResponse {
                content,
                model: request.model.clone(),
                usage: LlmUsage::default(),
                done: true,
            })
        }
    }

    #[tokio::test]
    async fn test_summarization_failure_skips_that_article() {
        // Call 1 derives keywords; call 2 (first summarization) fails.
        let llm = FlakyLlm {
            first_reply: r#"["kw1"]"#.to_string(),
            fail_on_call: 2,
            calls: Mutex::new(0),
        };
        let search = StubSearch::serving(vec![
            hit("Dropped", "https://example.com/dropped", "snippet one"),
            hit("Kept", "https://example.com/kept", "snippet two"),
        ]);
        let prompts = PromptRegistry::new().unwrap();

        let articles = generate_feed(&llm, "m", &prompts, &search, "profile", "en")
            .await
            .unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Kept");
    }

    #[tokio::test]
    async fn test_no_hits_yields_empty_feed() {
        let llm = ScriptedLlm::new(r#"["kw1"]"#);
        let search = StubSearch::serving(vec![]);
        let prompts = PromptRegistry::new().unwrap();

        let articles = generate_feed(&llm, "m", &prompts, &search, "profile", "en")
            .await
            .unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_empty_profile_rejected() {
        let llm = ScriptedLlm::new("[]");
        let search = StubSearch::serving(vec![]);
        let prompts = PromptRegistry::new().unwrap();

        let result = generate_feed(&llm, "m", &prompts, &search, "  ", "en").await;
        assert!(result.is_err());
    }
}
