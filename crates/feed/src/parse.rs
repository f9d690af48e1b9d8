//! Parsing of model output that should be a JSON array of strings.

/// Extract a `Vec<String>` from model output.
///
/// Tolerates markdown code fences and prose around the array: the slice
/// between the first `[` and the last `]` is parsed as JSON. The output is
/// never evaluated or executed; anything that is not a valid JSON string
/// array yields `None` and the caller falls back.
pub fn parse_string_list(raw: &str) -> Option<Vec<String>> {
    let trimmed = raw.trim();

    let start = trimmed.find('[')?;
    let end = trimmed.rfind(']')?;
    if end <= start {
        return None;
    }

    let candidate = &trimmed[start..=end];
    serde_json::from_str::<Vec<String>>(candidate).ok()
}
