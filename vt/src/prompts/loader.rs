//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to the
//! embedded defaults, then renders them with Handlebars.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Context for rendering the plan generation prompt
#[derive(Debug, Clone, Serialize)]
pub struct PlanPromptContext {
    /// The user's goal, verbatim
    pub goal: String,
    /// Rendered action catalog
    pub actions: String,
}

/// Context for rendering the reasoning prompt
#[derive(Debug, Clone, Serialize)]
pub struct ReasoningPromptContext {
    /// The resolved reasoning instruction
    pub instruction: String,
    /// Rendered memory snapshot
    pub memory: String,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.valet/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given directory
    ///
    /// Overrides are read from `{base}/.valet/prompts/{name}.pmt`.
    pub fn new(base: impl AsRef<Path>) -> Self {
        let user_dir = base.as_ref().join(".valet/prompts");

        Self {
            hbs: Handlebars::new(),
            user_dir: if user_dir.exists() { Some(user_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self {
            hbs: Handlebars::new(),
            user_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks the user override directory first, then the embedded
    /// defaults.
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from user override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        let template = self.load_template(template_name)?;

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plan_prompt() {
        let loader = PromptLoader::embedded_only();
        let context = PlanPromptContext {
            goal: "create a dinner event".to_string(),
            actions: "- get_time:\n  Description: Tell the time\n".to_string(),
        };

        let rendered = loader.render("plan", &context).unwrap();

        assert!(rendered.contains("create a dinner event"));
        assert!(rendered.contains("- get_time:"));
        // Template variables in the few-shot examples survive rendering
        assert!(rendered.contains("${free_slot}"));
    }

    #[test]
    fn test_render_reasoning_prompt() {
        let loader = PromptLoader::embedded_only();
        let context = ReasoningPromptContext {
            instruction: "find the first free slot".to_string(),
            memory: "  events_list: Gym at 8 PM".to_string(),
        };

        let rendered = loader.render("reasoning", &context).unwrap();

        assert!(rendered.contains("find the first free slot"));
        assert!(rendered.contains("Gym at 8 PM"));
    }

    #[test]
    fn test_render_does_not_escape_html() {
        let loader = PromptLoader::embedded_only();
        let context = ReasoningPromptContext {
            instruction: "compare a < b & b > c".to_string(),
            memory: "No data available".to_string(),
        };

        let rendered = loader.render("reasoning", &context).unwrap();
        assert!(rendered.contains("a < b & b > c"));
    }

    #[test]
    fn test_unknown_template_fails() {
        let loader = PromptLoader::embedded_only();
        let context = ReasoningPromptContext {
            instruction: String::new(),
            memory: String::new(),
        };

        assert!(loader.render("nonexistent", &context).is_err());
    }

    #[test]
    fn test_user_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let prompts_dir = dir.path().join(".valet/prompts");
        std::fs::create_dir_all(&prompts_dir).unwrap();
        std::fs::write(prompts_dir.join("reasoning.pmt"), "OVERRIDE {{{instruction}}}").unwrap();

        let loader = PromptLoader::new(dir.path());
        let context = ReasoningPromptContext {
            instruction: "think".to_string(),
            memory: String::new(),
        };

        let rendered = loader.render("reasoning", &context).unwrap();
        assert_eq!(rendered, "OVERRIDE think");
    }
}
