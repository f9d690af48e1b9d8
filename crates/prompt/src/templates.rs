//! Built-in template definitions.
//!
//! Each template is identified by a stable ID and compiled into the binary.
//! A workspace can shadow any of them with `.newsdesk/prompts/<id>.hbs`.

/// Generate clarifying questions from an initial interest description.
pub const PROBING_QUESTIONS: &str = "probing_questions";

/// Condense interest plus answers into a one-paragraph profile.
pub const PROFILE_SUMMARY: &str = "profile_summary";

/// Derive news search keywords from a profile summary.
pub const SEARCH_QUERIES: &str = "search_queries";

/// Summarize and translate one article description.
pub const ARTICLE_SUMMARY: &str = "article_summary";

/// All built-in template IDs, in registration order.
pub const BUILTIN_IDS: &[&str] = &[
    PROBING_QUESTIONS,
    PROFILE_SUMMARY,
    SEARCH_QUERIES,
    ARTICLE_SUMMARY,
];

pub(crate) fn builtin_source(id: &str) -> Option<&'static str> {
    match id {
        PROBING_QUESTIONS => Some(PROBING_QUESTIONS_TEMPLATE),
        PROFILE_SUMMARY => Some(PROFILE_SUMMARY_TEMPLATE),
        SEARCH_QUERIES => Some(SEARCH_QUERIES_TEMPLATE),
        ARTICLE_SUMMARY => Some(ARTICLE_SUMMARY_TEMPLATE),
        _ => None,
    }
}

const PROBING_QUESTIONS_TEMPLATE: &str = r#"Based on the user's initial interest description: "{{interest_text}}",
generate 3-4 short, specific questions to better understand their preferences.
Focus on aspects like:
- Specific sub-topics or companies.
- Preferred regions or markets (e.g., US, Europe, Asia).
- Types of news (e.g., product launches, financial results, policy changes).

Return the questions as a JSON array of strings. For example:
["What specific companies are you interested in?", "Are you focused on consumer products or enterprise solutions?"]

QUESTIONS:
"#;

const PROFILE_SUMMARY_TEMPLATE: &str = r#"Create a concise, one-paragraph summary of a user's news preferences.
This summary will be used to generate keywords for a news API.

User's initial interest: "{{initial_interest}}"
User's answers to clarifying questions:
{{answers}}

Synthesize this information into a clear profile summary.
For example: "The user is interested in the latest AI developments, specifically focusing on
Nvidia and Google's recent product launches and financial performance in the US market."

PROFILE SUMMARY:
"#;

const SEARCH_QUERIES_TEMPLATE: &str = r#"Based on this user profile: "{{profile_summary}}",
generate 3 diverse and specific keywords or short phrases for a news search.
Return the keywords as a JSON array of strings.

Example: ["Nvidia AI developments", "latest generative AI research", "Google AI product launches in Europe"]

KEYWORDS:
"#;

const ARTICLE_SUMMARY_TEMPLATE: &str = r#"Summarize the following news article description in 3-4 sentences.
The tone should be neutral and informative.
Translate the final summary into the language with the ISO 639-1 code: '{{target_language}}'.

ARTICLE DESCRIPTION:
"{{article_description}}"

SUMMARY:
"#;
