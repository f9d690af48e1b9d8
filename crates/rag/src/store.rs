//! Corpus construction from externally supplied articles.
//!
//! Articles arrive from the feed pipeline and may be ragged: missing titles,
//! links or sources. Construction sanitizes with placeholders rather than
//! rejecting, and only drops an article when it has neither title nor
//! summary, since there would be nothing to index.

use crate::types::{Article, Corpus, Document, DocumentMetadata};

/// Placeholder title for articles that arrived without one.
const PLACEHOLDER_TITLE: &str = "No Title";

/// Placeholder source for articles that arrived without one.
const PLACEHOLDER_SOURCE: &str = "Unknown";

/// Placeholder link for articles that arrived without one.
const PLACEHOLDER_LINK: &str = "#";

/// Build a corpus from an article list, preserving input order.
pub fn build_corpus(articles: &[Article]) -> Corpus {
    let documents: Vec<Document> = articles.iter().filter_map(document_from_article).collect();

    if documents.len() < articles.len() {
        tracing::debug!(
            "Skipped {} articles with neither title nor summary",
            articles.len() - documents.len()
        );
    }

    Corpus::new(documents)
}

/// Convert one article into a document, or None when it is not indexable.
fn document_from_article(article: &Article) -> Option<Document> {
    let title = article.title.trim();
    let summary = article.summary.trim();

    if title.is_empty() && summary.is_empty() {
        return None;
    }

    let title = if title.is_empty() {
        PLACEHOLDER_TITLE
    } else {
        title
    };

    let source = article.source.trim();
    let link = article.link.trim();

    Some(Document {
        content: format!("Title: {}\nSummary: {}", title, summary),
        metadata: DocumentMetadata {
            source: if source.is_empty() {
                PLACEHOLDER_SOURCE.to_string()
            } else {
                source.to_string()
            },
            link: if link.is_empty() {
                PLACEHOLDER_LINK.to_string()
            } else {
                link.to_string()
            },
        },
    })
}
