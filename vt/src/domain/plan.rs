//! Plan domain types and wire format
//!
//! A Plan is the unit of agentic work: a goal plus an ordered sequence of
//! steps. Each step either invokes a catalog action or runs a free-form
//! reasoning instruction. The JSON wire format is validated once at parse
//! time into the closed [`Step`]/[`StepKind`] structure; execution logic
//! never re-checks shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors produced while converting the wire format into a [`Step`]
#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("Step '{id}' must have either 'action' or 'reasoning'")]
    MissingKind { id: String },

    #[error("Step '{id}' cannot have both 'action' and 'reasoning'")]
    BothKinds { id: String },

    #[error("Step '{id}' is a reasoning step and cannot take 'arguments'")]
    ReasoningArguments { id: String },
}

/// What a step does when dispatched
#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    /// Invoke a named catalog action with (possibly templated) arguments
    Action {
        action: String,
        arguments: BTreeMap<String, Value>,
    },
    /// Run a free-form reasoning instruction over accumulated results
    Reasoning { reasoning: String },
}

/// A unit of work within a Plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StepWire", into = "StepWire")]
pub struct Step {
    /// Unique identifier within the plan (e.g., "s1")
    pub id: String,

    /// Action or reasoning variant
    pub kind: StepKind,

    /// Name under which the result is written into plan memory
    pub save_as: Option<String>,

    /// Step ids that must complete before this step runs.
    /// Empty means "after the previous step in definition order".
    pub depends_on: Vec<String>,

    /// Guard expression evaluated before execution; falsy skips the step
    pub conditional: Option<String>,

    /// When true, failure of this step does not abort the plan
    pub best_effort: bool,
}

impl Step {
    /// Create an action step
    pub fn action(id: impl Into<String>, action: impl Into<String>, arguments: BTreeMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            kind: StepKind::Action {
                action: action.into(),
                arguments,
            },
            save_as: None,
            depends_on: Vec::new(),
            conditional: None,
            best_effort: false,
        }
    }

    /// Create a reasoning step
    pub fn reasoning(id: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: StepKind::Reasoning {
                reasoning: instruction.into(),
            },
            save_as: None,
            depends_on: Vec::new(),
            conditional: None,
            best_effort: false,
        }
    }

    /// Builder method to set save_as
    pub fn with_save_as(mut self, name: impl Into<String>) -> Self {
        self.save_as = Some(name.into());
        self
    }

    /// Builder method to add a dependency
    pub fn with_dependency(mut self, dep: impl Into<String>) -> Self {
        self.depends_on.push(dep.into());
        self
    }

    /// Builder method to set the conditional guard
    pub fn with_conditional(mut self, expr: impl Into<String>) -> Self {
        self.conditional = Some(expr.into());
        self
    }

    /// Builder method to mark the step best-effort
    pub fn with_best_effort(mut self) -> Self {
        self.best_effort = true;
        self
    }

    /// All texts in this step that may contain `${var}` references
    pub fn templated_texts(&self) -> Vec<&str> {
        let mut texts = Vec::new();
        match &self.kind {
            StepKind::Action { arguments, .. } => {
                for value in arguments.values() {
                    if let Value::String(s) = value {
                        texts.push(s.as_str());
                    }
                }
            }
            StepKind::Reasoning { reasoning } => texts.push(reasoning.as_str()),
        }
        if let Some(cond) = &self.conditional {
            texts.push(cond.as_str());
        }
        texts
    }
}

/// A Plan is an ordered, dependency-annotated set of steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Free-text description of the user's objective
    pub goal: String,

    /// Steps in definition order
    pub steps: Vec<Step>,
}

impl Plan {
    /// Create a new Plan
    pub fn new(goal: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            goal: goal.into(),
            steps,
        }
    }

    /// Parse a plan from its JSON wire format
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize the plan to its JSON wire format
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Look up a step by id
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }
}

/// Wire-format shape of a step: exactly one of `action`/`reasoning`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StepWire {
    id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    reasoning: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    arguments: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    save_as: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    conditional: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    best_effort: bool,
}

impl TryFrom<StepWire> for Step {
    type Error = PlanParseError;

    fn try_from(wire: StepWire) -> Result<Self, Self::Error> {
        let kind = match (wire.action, wire.reasoning) {
            (Some(_), Some(_)) => return Err(PlanParseError::BothKinds { id: wire.id }),
            (None, None) => return Err(PlanParseError::MissingKind { id: wire.id }),
            (Some(action), None) => StepKind::Action {
                action,
                arguments: wire.arguments,
            },
            (None, Some(reasoning)) => {
                if !wire.arguments.is_empty() {
                    return Err(PlanParseError::ReasoningArguments { id: wire.id });
                }
                StepKind::Reasoning { reasoning }
            }
        };

        Ok(Step {
            id: wire.id,
            kind,
            save_as: wire.save_as,
            depends_on: wire.depends_on,
            conditional: wire.conditional,
            best_effort: wire.best_effort,
        })
    }
}

impl From<Step> for StepWire {
    fn from(step: Step) -> Self {
        let (action, reasoning, arguments) = match step.kind {
            StepKind::Action { action, arguments } => (Some(action), None, arguments),
            StepKind::Reasoning { reasoning } => (None, Some(reasoning), BTreeMap::new()),
        };

        StepWire {
            id: step.id,
            action,
            reasoning,
            arguments,
            save_as: step.save_as,
            depends_on: step.depends_on,
            conditional: step.conditional,
            best_effort: step.best_effort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_action_step() {
        let plan = Plan::from_json(
            r#"{
                "goal": "Create a dinner event",
                "steps": [
                    {"id": "s1", "action": "get_events", "arguments": {"date": "today"}, "save_as": "events"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(plan.goal, "Create a dinner event");
        assert_eq!(plan.steps.len(), 1);

        let step = &plan.steps[0];
        assert_eq!(step.id, "s1");
        assert_eq!(step.save_as, Some("events".to_string()));
        match &step.kind {
            StepKind::Action { action, arguments } => {
                assert_eq!(action, "get_events");
                assert_eq!(arguments.get("date"), Some(&json!("today")));
            }
            StepKind::Reasoning { .. } => panic!("expected action step"),
        }
    }

    #[test]
    fn test_parse_reasoning_step() {
        let plan = Plan::from_json(
            r#"{
                "goal": "g",
                "steps": [{"id": "s1", "reasoning": "find a free slot", "save_as": "slot"}]
            }"#,
        )
        .unwrap();

        match &plan.steps[0].kind {
            StepKind::Reasoning { reasoning } => assert_eq!(reasoning, "find a free slot"),
            StepKind::Action { .. } => panic!("expected reasoning step"),
        }
    }

    #[test]
    fn test_parse_rejects_both_kinds() {
        let result = Plan::from_json(
            r#"{"goal": "g", "steps": [{"id": "s1", "action": "get_time", "reasoning": "think"}]}"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("both"), "unexpected error: {err}");
    }

    #[test]
    fn test_parse_rejects_neither_kind() {
        let result = Plan::from_json(r#"{"goal": "g", "steps": [{"id": "s1"}]}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("either"), "unexpected error: {err}");
    }

    #[test]
    fn test_parse_rejects_arguments_on_reasoning() {
        let result = Plan::from_json(
            r#"{"goal": "g", "steps": [{"id": "s1", "reasoning": "think", "arguments": {"x": 1}}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_defaults() {
        let plan = Plan::from_json(r#"{"goal": "g", "steps": [{"id": "s1", "action": "get_time"}]}"#).unwrap();

        let step = &plan.steps[0];
        assert!(step.save_as.is_none());
        assert!(step.depends_on.is_empty());
        assert!(step.conditional.is_none());
        assert!(!step.best_effort);
    }

    #[test]
    fn test_wire_round_trip() {
        let plan = Plan::new(
            "Schedule dinner",
            vec![
                Step::action("s1", "get_events", BTreeMap::new()).with_save_as("events"),
                Step::reasoning("s2", "find a free slot tonight from ${events}").with_save_as("slot"),
                Step::action(
                    "s3",
                    "create_event",
                    BTreeMap::from([
                        ("title".to_string(), json!("Dinner")),
                        ("start_time".to_string(), json!("${slot}")),
                    ]),
                )
                .with_dependency("s2")
                .with_conditional("${slot} != null")
                .with_best_effort(),
            ],
        );

        let json = plan.to_json().unwrap();
        let back = Plan::from_json(&json).unwrap();

        assert_eq!(plan, back);
    }

    #[test]
    fn test_templated_texts() {
        let step = Step::action(
            "s1",
            "create_event",
            BTreeMap::from([
                ("title".to_string(), json!("${subject}")),
                ("limit".to_string(), json!(3)),
            ]),
        )
        .with_conditional("${subject} != null");

        let texts = step.templated_texts();
        assert_eq!(texts.len(), 2); // the non-string argument is not scanned
        assert!(texts.contains(&"${subject}"));
        assert!(texts.contains(&"${subject} != null"));
    }

    #[test]
    fn test_step_lookup() {
        let plan = Plan::new(
            "g",
            vec![Step::reasoning("a", "one"), Step::reasoning("b", "two")],
        );

        assert!(plan.step("b").is_some());
        assert!(plan.step("missing").is_none());
    }
}
