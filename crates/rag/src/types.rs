//! Data model for the answering core.

use serde::{Deserialize, Serialize};

/// Fixed reply when a question arrives before any news feed exists.
pub const FEED_NOT_GENERATED: &str =
    "The news feed hasn't been generated yet. Please generate the news first.";

/// Fixed reply for an empty or whitespace-only question.
pub const EMPTY_QUESTION: &str = "Please enter a question about your news feed.";

/// Fixed reply when generation produced no usable text.
pub const NO_RELEVANT_INFO: &str =
    "I could not find relevant information in the current news feed.";

/// Fixed reply when even the fallback path failed. This is the only failure
/// a caller ever sees, and it arrives as plain text, not as an error.
pub const ANSWER_UNAVAILABLE: &str =
    "Sorry, I'm unable to answer questions about your news feed right now. Please try again later.";

/// A news article as supplied by the feed pipeline.
///
/// Externally owned and read-only to this crate. `summary` holds the
/// already-summarized (and translated) text; it is what gets indexed.
/// `snippet` is the original description, kept for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub source: String,
    pub summary: String,
    pub snippet: String,
}

/// Citation metadata carried through retrieval alongside each document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: String,
    pub link: String,
}

/// A document derived from one article, owned by the core for the duration
/// of a single query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable concatenation of title and summary; the text that is embedded
    /// and handed to the generation prompt.
    pub content: String,

    /// Source/link carried for potential citation.
    pub metadata: DocumentMetadata,
}

/// The ordered, ephemeral set of documents available for one answer call.
///
/// Rebuilt wholesale from the article list on every call; there is no
/// incremental update and no deletion.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Create a corpus from an ordered document list.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All documents, in input order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Document at a corpus position, if present.
    pub fn get(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }
}
