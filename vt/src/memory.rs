//! Plan memory - request-scoped variable store
//!
//! Steps pass data forward by writing results under their `save_as` name
//! and referencing them later through `${name}` templates. Memory is
//! created empty at execution start and discarded at execution end; it is
//! never shared across plans or conversations.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Value strings longer than this are truncated in prompt renderings
const MAX_RENDERED_CHARS: usize = 200;

fn template_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("template regex is valid"))
}

/// Extract the `${name}` references from a text, deduplicated, in order
pub fn template_refs(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for cap in template_re().captures_iter(text) {
        let name = cap[1].trim().to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// Errors raised during template resolution
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Template references variable '{name}' which has not been set")]
    UnresolvedVariable { name: String },
}

/// Request-scoped variable store with `${name}` template resolution
#[derive(Debug, Default)]
pub struct PlanMemory {
    values: HashMap<String, Value>,
    // Insertion order, for diagnostic dumps and prompt renderings
    order: Vec<String>,
}

impl PlanMemory {
    /// Create an empty memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under a name; overwriting is last-write-wins
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if !self.values.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.values.insert(name, value);
    }

    /// Store a plain text value
    pub fn set_text(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.set(name, Value::String(text.into()));
    }

    /// Look up a value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Check whether a name has been set
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of stored variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolve every `${name}` occurrence in a template
    ///
    /// Substitution is a single pass: substituted values are not re-scanned
    /// for further `${...}` patterns. A reference to a name that was never
    /// set fails; it never silently becomes an empty string.
    pub fn resolve(&self, template: &str) -> Result<String, MemoryError> {
        let mut out = String::with_capacity(template.len());
        let mut last_end = 0;

        for cap in template_re().captures_iter(template) {
            let whole = cap.get(0).expect("capture 0 always present");
            let name = cap[1].trim();

            let value = self
                .values
                .get(name)
                .ok_or_else(|| MemoryError::UnresolvedVariable { name: name.to_string() })?;

            out.push_str(&template[last_end..whole.start()]);
            out.push_str(&render_value(value, usize::MAX));
            last_end = whole.end();
        }

        out.push_str(&template[last_end..]);
        Ok(out)
    }

    /// Render the full store for embedding in a reasoning prompt
    ///
    /// One `key: value` line per variable in insertion order, long values
    /// truncated.
    pub fn render_for_prompt(&self) -> String {
        if self.order.is_empty() {
            return "No data available".to_string();
        }

        self.order
            .iter()
            .filter_map(|name| {
                self.values
                    .get(name)
                    .map(|value| format!("  {}: {}", name, render_value(value, MAX_RENDERED_CHARS)))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Stringify a value the way a user would write it: strings unquoted,
/// everything else as compact JSON
fn render_value(value: &Value, max_chars: usize) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if text.chars().count() > max_chars {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        text
    }
}
