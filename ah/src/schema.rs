//! Action schema types
//!
//! The schema is the contract between the surrounding system and the
//! planner: a mapping from action name to its description and argument
//! lists. The planner must never invent an action outside this set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Specification of a single action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Human-readable description, shown to the planning model
    pub description: String,

    /// Argument names that must be supplied
    #[serde(default)]
    pub required_args: Vec<String>,

    /// Argument names that may be supplied
    #[serde(default)]
    pub optional_args: Vec<String>,
}

impl ActionSpec {
    /// Create a new spec
    pub fn new(description: impl Into<String>, required_args: &[&str], optional_args: &[&str]) -> Self {
        Self {
            description: description.into(),
            required_args: required_args.iter().map(|s| s.to_string()).collect(),
            optional_args: optional_args.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check whether an argument name is known to this action
    pub fn accepts(&self, arg: &str) -> bool {
        self.required_args.iter().any(|a| a == arg) || self.optional_args.iter().any(|a| a == arg)
    }
}

/// The full action catalog, ordered by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionSchema {
    actions: BTreeMap<String, ActionSpec>,
}

impl ActionSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action spec
    pub fn insert(&mut self, name: impl Into<String>, spec: ActionSpec) {
        self.actions.insert(name.into(), spec);
    }

    /// Look up a spec by action name
    pub fn get(&self, name: &str) -> Option<&ActionSpec> {
        self.actions.get(name)
    }

    /// Check whether an action name exists
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Iterate over (name, spec) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ActionSpec)> {
        self.actions.iter()
    }

    /// Number of actions in the catalog
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Render the catalog for embedding in a planning prompt
    ///
    /// One block per action with description and argument lists; empty
    /// argument lists render as "none" so the model is never left guessing.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (name, spec) in &self.actions {
            let required = if spec.required_args.is_empty() {
                "none".to_string()
            } else {
                spec.required_args.join(", ")
            };
            let optional = if spec.optional_args.is_empty() {
                "none".to_string()
            } else {
                spec.optional_args.join(", ")
            };
            out.push_str(&format!(
                "- {}:\n  Description: {}\n  Required args: {}\n  Optional args: {}\n",
                name, spec.description, required, optional
            ));
        }
        out
    }
}
