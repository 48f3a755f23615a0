//! Planner - LLM-driven generation of executable Plans
//!
//! Takes a natural-language goal plus the action catalog and produces a
//! validated [`Plan`]. The model is steered into structured output through
//! a `submit_plan` tool whose input schema is the plan wire shape; if it
//! answers with plain text instead, the first JSON object in the text is
//! used as a fallback.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use actionhub::ActionSchema;

use crate::config::PlannerConfig;
use crate::domain::{Plan, StepKind};
use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, ToolDefinition};
use crate::memory::template_refs;
use crate::prompts::{PlanPromptContext, PromptLoader};

/// Errors that can occur during plan generation
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Failed to render planning prompt: {0}")]
    Template(String),

    #[error("Model did not produce a parseable plan: {0}")]
    Malformed(String),

    #[error("Plan failed validation: {}", errors.join("; "))]
    Invalid { errors: Vec<String> },
}

/// System prompt for plan generation
const PLANNER_SYSTEM_PROMPT: &str = "You are a planning agent. Produce precise, minimal plans \
     that use only the documented actions. Call submit_plan exactly once.";

/// Generates validated Plans from user goals
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    config: PlannerConfig,
    prompts: PromptLoader,
}

impl Planner {
    /// Create a new planner with embedded prompts
    pub fn new(llm: Arc<dyn LlmClient>, config: PlannerConfig) -> Self {
        Self {
            llm,
            config,
            prompts: PromptLoader::embedded_only(),
        }
    }

    /// Create a planner with a custom prompt loader
    pub fn with_prompts(llm: Arc<dyn LlmClient>, config: PlannerConfig, prompts: PromptLoader) -> Self {
        Self { llm, config, prompts }
    }

    /// Generate a plan for a goal, retrying a bounded number of times
    ///
    /// Each attempt is one LLM call. The last error surfaces if every
    /// attempt fails.
    pub async fn generate(&self, goal: &str, schema: &ActionSchema) -> Result<Plan, PlanError> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying plan generation");
            }

            match self.generate_once(goal, schema).await {
                Ok(plan) => {
                    info!(steps = plan.steps.len(), "generated plan for goal");
                    return Ok(plan);
                }
                Err(e) => {
                    debug!(attempt, error = %e, "plan generation attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.expect("at least one attempt was made"))
    }

    /// One generation attempt: prompt, call, parse, validate
    async fn generate_once(&self, goal: &str, schema: &ActionSchema) -> Result<Plan, PlanError> {
        let prompt = self
            .prompts
            .render(
                "plan",
                &PlanPromptContext {
                    goal: goal.to_string(),
                    actions: schema.describe(),
                },
            )
            .map_err(|e| PlanError::Template(e.to_string()))?;

        let request = CompletionRequest {
            system_prompt: PLANNER_SYSTEM_PROMPT.to_string(),
            messages: vec![Message::user(prompt)],
            tools: self.build_tools(),
            max_tokens: self.config.max_tokens,
        };

        let response = self.llm.complete(request).await?;
        let plan = self.parse_plan_response(response)?;

        let errors = validate_plan(&plan, schema, self.config.max_steps);
        if !errors.is_empty() {
            return Err(PlanError::Invalid { errors });
        }

        // References to names no step saves are legal here (resolution is a
        // runtime concern), but they almost always mean the model slipped.
        for missing in unknown_template_refs(&plan) {
            warn!(var = %missing, "plan references a variable no step saves");
        }

        Ok(plan)
    }

    /// Build the submit_plan tool mirroring the plan wire format
    fn build_tools(&self) -> Vec<ToolDefinition> {
        vec![ToolDefinition::new(
            "submit_plan",
            "Submit the execution plan. Call this once with the goal and all steps.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "goal": {
                        "type": "string",
                        "description": "Restatement of the user's goal"
                    },
                    "steps": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": {
                                    "type": "string",
                                    "description": "Short unique step id, e.g. s1"
                                },
                                "action": {
                                    "type": "string",
                                    "description": "Action name to invoke (mutually exclusive with reasoning)"
                                },
                                "arguments": {
                                    "type": "object",
                                    "description": "Action arguments; string values may reference stored variables as ${name}"
                                },
                                "reasoning": {
                                    "type": "string",
                                    "description": "Reasoning instruction (mutually exclusive with action)"
                                },
                                "save_as": {
                                    "type": "string",
                                    "description": "Variable name to store this step's result under"
                                },
                                "depends_on": {
                                    "type": "array",
                                    "items": { "type": "string" },
                                    "description": "Ids of steps that must complete first"
                                },
                                "conditional": {
                                    "type": "string",
                                    "description": "Guard expression; the step is skipped when falsy"
                                },
                                "best_effort": {
                                    "type": "boolean",
                                    "description": "When true, failure of this step does not abort the plan"
                                }
                            },
                            "required": ["id"]
                        }
                    }
                },
                "required": ["goal", "steps"]
            }),
        )]
    }

    /// Parse the plan out of the model response
    fn parse_plan_response(&self, response: CompletionResponse) -> Result<Plan, PlanError> {
        // Prefer the submit_plan tool call
        for tool_call in &response.tool_calls {
            if tool_call.name == "submit_plan" {
                return serde_json::from_value(tool_call.input.clone())
                    .map_err(|e| PlanError::Malformed(e.to_string()));
            }
        }

        // Fall back to extracting a JSON object from text content
        if let Some(content) = &response.content
            && let Some(json) = extract_json_object(content)
        {
            return Plan::from_json(json).map_err(|e| PlanError::Malformed(e.to_string()));
        }

        Err(PlanError::Malformed("response contained no plan".to_string()))
    }
}

/// Extract the outermost JSON object from free text
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Validate a parsed plan against the action schema
///
/// Returns every problem found, not just the first, so a retry prompt (or
/// a log line) can show the model the full picture.
pub fn validate_plan(plan: &Plan, schema: &ActionSchema, max_steps: usize) -> Vec<String> {
    let mut errors = Vec::new();

    if plan.steps.is_empty() {
        errors.push("plan has no steps".to_string());
        return errors;
    }

    if plan.steps.len() > max_steps {
        errors.push(format!("plan has {} steps (max {})", plan.steps.len(), max_steps));
    }

    let ids: HashSet<&str> = plan.steps.iter().map(|s| s.id.as_str()).collect();
    if ids.len() != plan.steps.len() {
        errors.push("step ids are not unique".to_string());
    }

    let mut seen_save_as: HashSet<&str> = HashSet::new();

    for step in &plan.steps {
        match &step.kind {
            StepKind::Action { action, arguments } => match schema.get(action) {
                Some(spec) => {
                    for arg in arguments.keys() {
                        if !spec.accepts(arg) {
                            errors.push(format!("step '{}': invalid argument '{}' for action '{}'", step.id, arg, action));
                        }
                    }
                    for required in &spec.required_args {
                        if !arguments.contains_key(required) {
                            errors.push(format!(
                                "step '{}': missing required argument '{}' for action '{}'",
                                step.id, required, action
                            ));
                        }
                    }
                }
                None => errors.push(format!("step '{}': unknown action '{}'", step.id, action)),
            },
            StepKind::Reasoning { reasoning } => {
                if reasoning.trim().is_empty() {
                    errors.push(format!("step '{}': reasoning instruction is empty", step.id));
                }
            }
        }

        if let Some(save_as) = &step.save_as {
            if save_as.trim().is_empty() {
                errors.push(format!("step '{}': save_as is empty", step.id));
            } else if !seen_save_as.insert(save_as.as_str()) {
                errors.push(format!("step '{}': variable '{}' is saved more than once", step.id, save_as));
            }
        }

        for dep in &step.depends_on {
            if dep == &step.id {
                errors.push(format!("step '{}' depends on itself", step.id));
            } else if !ids.contains(dep.as_str()) {
                errors.push(format!("step '{}' depends on unknown step '{}'", step.id, dep));
            }
        }
    }

    errors
}

/// Template references that no step's save_as will ever satisfy
fn unknown_template_refs(plan: &Plan) -> Vec<String> {
    let saved: HashSet<&str> = plan.steps.iter().filter_map(|s| s.save_as.as_deref()).collect();

    let mut missing = Vec::new();
    for step in &plan.steps {
        for text in step.templated_texts() {
            for name in template_refs(text) {
                if !saved.contains(name.as_str()) && !missing.contains(&name) {
                    missing.push(name);
                }
            }
        }
    }
    missing
}
