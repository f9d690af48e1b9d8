//! Template registry with workspace overrides.

use crate::templates;
use newsdesk_core::{AppError, AppResult};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

/// Compiled prompt templates, keyed by ID.
///
/// Construction registers every built-in template; `with_overrides` then
/// shadows built-ins with any `.newsdesk/prompts/<id>.hbs` files found in
/// the workspace. Overrides for unknown IDs are registered too, so a
/// workspace can carry extra templates.
pub struct PromptRegistry {
    handlebars: Handlebars<'static>,
}

impl PromptRegistry {
    /// Registry with only the built-in templates.
    pub fn new() -> AppResult<Self> {
        let mut handlebars = Handlebars::new();

        // Prompts are plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        for id in templates::BUILTIN_IDS {
            let source = templates::builtin_source(id).ok_or_else(|| {
                AppError::Prompt(format!("Missing built-in template source: {}", id))
            })?;
            handlebars
                .register_template_string(id, source)
                .map_err(|e| {
                    AppError::Prompt(format!("Failed to compile template '{}': {}", id, e))
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Registry with built-ins shadowed by workspace template files.
    ///
    /// Looks for `<workspace>/.newsdesk/prompts/*.hbs`; the file stem is the
    /// template ID. A missing prompts directory is not an error.
    pub fn with_overrides(workspace_path: &Path) -> AppResult<Self> {
        let mut registry = Self::new()?;

        let prompts_dir = workspace_path.join(".newsdesk/prompts");
        if !prompts_dir.exists() {
            return Ok(registry);
        }

        for entry in walkdir::WalkDir::new(&prompts_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("hbs") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let source = std::fs::read_to_string(path).map_err(|e| {
                AppError::Prompt(format!("Failed to read template {:?}: {}", path, e))
            })?;

            registry
                .handlebars
                .register_template_string(id, &source)
                .map_err(|e| {
                    AppError::Prompt(format!("Failed to compile template '{}': {}", id, e))
                })?;

            tracing::info!("Loaded workspace template override: {}", id);
        }

        Ok(registry)
    }

    /// Render a template by ID with the given variables.
    pub fn render<T: Serialize>(&self, id: &str, variables: &T) -> AppResult<String> {
        self.handlebars
            .render(id, variables)
            .map_err(|e| AppError::Prompt(format!("Failed to render template '{}': {}", id, e)))
    }

    /// Whether a template with this ID is registered.
    pub fn has(&self, id: &str) -> bool {
        self.handlebars.has_template(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builtins_registered() {
        let registry = PromptRegistry::new().unwrap();
        for id in templates::BUILTIN_IDS {
            assert!(registry.has(id), "missing built-in: {}", id);
        }
    }

    #[test]
    fn test_render_probing_questions() {
        let registry = PromptRegistry::new().unwrap();
        let rendered = registry
            .render(
                templates::PROBING_QUESTIONS,
                &json!({ "interest_text": "electric vehicles" }),
            )
            .unwrap();
        assert!(rendered.contains("\"electric vehicles\""));
        assert!(rendered.contains("JSON array"));
    }

    #[test]
    fn test_render_does_not_html_escape() {
        let registry = PromptRegistry::new().unwrap();
        let rendered = registry
            .render(
                templates::PROFILE_SUMMARY,
                &json!({
                    "initial_interest": "AI & chips",
                    "answers": "- Q: <none>",
                }),
            )
            .unwrap();
        assert!(rendered.contains("AI & chips"));
        assert!(rendered.contains("<none>"));
    }

    #[test]
    fn test_render_unknown_id_fails() {
        let registry = PromptRegistry::new().unwrap();
        let result = registry.render("no_such_template", &json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_workspace_override_shadows_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let prompts_dir = temp_dir.path().join(".newsdesk/prompts");
        fs::create_dir_all(&prompts_dir).unwrap();
        fs::write(
            prompts_dir.join("search_queries.hbs"),
            "Custom queries for: {{profile_summary}}",
        )
        .unwrap();

        let registry = PromptRegistry::with_overrides(temp_dir.path()).unwrap();
        let rendered = registry
            .render(
                templates::SEARCH_QUERIES,
                &json!({ "profile_summary": "EV news" }),
            )
            .unwrap();
        assert_eq!(rendered, "Custom queries for: EV news");

        // Other built-ins are untouched
        assert!(registry.has(templates::ARTICLE_SUMMARY));
    }

    #[test]
    fn test_missing_prompts_dir_is_fine() {
        let temp_dir = TempDir::new().unwrap();
        let registry = PromptRegistry::with_overrides(temp_dir.path()).unwrap();
        assert!(registry.has(templates::PROBING_QUESTIONS));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let prompts_dir = temp_dir.path().join(".newsdesk/prompts");
        fs::create_dir_all(&prompts_dir).unwrap();
        fs::write(prompts_dir.join("broken.hbs"), "{{#if}}unclosed").unwrap();

        let result = PromptRegistry::with_overrides(temp_dir.path());
        assert!(result.is_err());
    }
}
