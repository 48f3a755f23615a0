//! Plan Executor - dependency-ordered execution of Plans
//!
//! Walks the plan in topological order (definition order breaks ties),
//! resolves `${var}` templates against plan memory, dispatches each step to
//! the action gateway or the reasoning engine, stores `save_as` results,
//! enforces conditional guards, and records timing and status for every
//! step. One plan executes at a time; steps never run concurrently because
//! later steps routinely consume earlier steps' results through memory.

mod graph;

pub use graph::{effective_deps, topological_sort, validate_dependency_graph};

use std::time::{Duration, Instant};

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use actionhub::{ActionError, ActionGateway, Arguments};

use crate::config::ExecutorConfig;
use crate::domain::{ExecutionRecord, ExecutionResult, Plan, Step, StepKind, StepStatus};
use crate::memory::{MemoryError, PlanMemory};
use crate::reasoning::{ReasoningEngine, ReasoningError};

/// Fatal errors raised before any step executes
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("Plan dependency graph contains a cycle: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },
}

/// Receiver half of the cancellation signal
pub type CancelSignal = watch::Receiver<bool>;

/// Create a cancellation channel; send `true` to cancel
pub fn cancel_channel() -> (watch::Sender<bool>, CancelSignal) {
    watch::channel(false)
}

/// Why a single step failed
#[derive(Debug, Error)]
enum StepFailure {
    #[error("{0}")]
    Resolution(#[from] MemoryError),

    #[error("Action failed: {0}")]
    Action(#[from] ActionError),

    #[error("Reasoning failed: {0}")]
    Reasoning(#[from] ReasoningError),

    #[error("Step timed out after {0:?}")]
    Timeout(Duration),

    #[error("cancelled")]
    Cancelled,
}

/// Executes Plans against an action gateway and a reasoning engine
pub struct PlanExecutor {
    gateway: Arc<dyn ActionGateway>,
    reasoning: ReasoningEngine,
    config: ExecutorConfig,
}

impl PlanExecutor {
    /// Create a new executor
    pub fn new(gateway: Arc<dyn ActionGateway>, reasoning: ReasoningEngine, config: ExecutorConfig) -> Self {
        Self {
            gateway,
            reasoning,
            config,
        }
    }

    /// Execute a plan to completion without external cancellation
    pub async fn execute(&self, plan: &Plan) -> Result<ExecutionResult, ExecuteError> {
        let (_cancel_tx, cancel_rx) = cancel_channel();
        self.execute_with_cancel(plan, cancel_rx).await
    }

    /// Execute a plan, honoring an external cancellation signal
    ///
    /// On cancellation the in-flight step is abandoned and recorded as
    /// failed, all not-yet-started steps are skipped with reason
    /// "cancelled", and the partial result returns immediately.
    pub async fn execute_with_cancel(
        &self,
        plan: &Plan,
        mut cancel: CancelSignal,
    ) -> Result<ExecutionResult, ExecuteError> {
        let run_id = format!("run-{}", &Uuid::now_v7().simple().to_string()[..12]);
        info!(%run_id, goal = %plan.goal, steps = plan.steps.len(), "executing plan");
        let started = Instant::now();

        let order = topological_sort(plan).map_err(|path| ExecuteError::Cycle { path })?;

        let mut memory = PlanMemory::new();
        let mut records: Vec<ExecutionRecord> =
            plan.steps.iter().map(|s| ExecutionRecord::pending(&s.id)).collect();

        // Id of the step whose failure halted the plan, if any
        let mut halted_on: Option<String> = None;
        let mut was_cancelled = false;

        for &idx in &order {
            let step = &plan.steps[idx];

            if *cancel.borrow() {
                was_cancelled = true;
            }
            if was_cancelled {
                records[idx].skip("cancelled");
                continue;
            }
            if let Some(failed_id) = &halted_on {
                records[idx].skip(format!("not run: plan aborted after step '{}' failed", failed_id));
                continue;
            }

            // Conditional guard: falsy or unresolvable skips without failing
            if let Some(cond) = &step.conditional {
                match memory.resolve(cond) {
                    Ok(resolved) if evaluate_conditional(&resolved) => {}
                    Ok(_) => {
                        debug!(step = %step.id, conditional = %cond, "conditional was falsy, skipping");
                        records[idx].skip(format!("conditional '{}' was falsy", cond));
                        continue;
                    }
                    Err(e) => {
                        debug!(step = %step.id, error = %e, "conditional could not be resolved, skipping");
                        records[idx].skip(format!("conditional '{}' could not be resolved: {}", cond, e));
                        continue;
                    }
                }
            }

            records[idx].start();
            debug!(step = %step.id, "dispatching step");

            match self.dispatch(step, &memory, &mut cancel).await {
                Ok(output) => {
                    if let Some(save_as) = &step.save_as {
                        memory.set_text(save_as, &output);
                    }
                    records[idx].complete(output);
                }
                Err(StepFailure::Cancelled) => {
                    warn!(step = %step.id, "step abandoned: request cancelled");
                    records[idx].fail("cancelled");
                    was_cancelled = true;
                }
                Err(failure) => {
                    warn!(step = %step.id, error = %failure, "step failed");
                    records[idx].fail(failure.to_string());
                    if !step.best_effort {
                        halted_on = Some(step.id.clone());
                    }
                }
            }
        }

        let succeeded = halted_on.is_none() && !was_cancelled;
        let message = build_message(plan, &records, &order, &halted_on, was_cancelled);

        info!(
            %run_id,
            succeeded,
            duration_ms = started.elapsed().as_millis() as u64,
            "plan execution finished"
        );

        Ok(ExecutionResult {
            run_id,
            goal: plan.goal.clone(),
            succeeded,
            message,
            records,
        })
    }

    /// Resolve templates and dispatch one step under timeout and cancellation
    async fn dispatch(&self, step: &Step, memory: &PlanMemory, cancel: &mut CancelSignal) -> Result<String, StepFailure> {
        let timeout = Duration::from_millis(self.config.step_timeout_ms);

        match &step.kind {
            StepKind::Action { action, arguments } => {
                let resolved = resolve_arguments(arguments, memory)?;
                let work = async { self.gateway.execute(action, &resolved).await.map_err(StepFailure::from) };
                bounded(work, cancel, timeout).await
            }
            StepKind::Reasoning { reasoning } => {
                let instruction = memory.resolve(reasoning)?;
                let work = async {
                    self.reasoning
                        .execute(&instruction, memory)
                        .await
                        .map_err(StepFailure::from)
                };
                bounded(work, cancel, timeout).await
            }
        }
    }
}

/// Run a step future against the timeout and the cancellation signal
async fn bounded<F>(work: F, cancel: &mut CancelSignal, timeout: Duration) -> Result<String, StepFailure>
where
    F: Future<Output = Result<String, StepFailure>>,
{
    tokio::select! {
        _ = wait_cancelled(cancel) => Err(StepFailure::Cancelled),
        result = tokio::time::timeout(timeout, work) => match result {
            Ok(outcome) => outcome,
            Err(_) => Err(StepFailure::Timeout(timeout)),
        },
    }
}

/// Resolve until the cancellation flag flips to true
async fn wait_cancelled(cancel: &mut CancelSignal) {
    loop {
        if *cancel.borrow() {
            return;
        }
        if cancel.changed().await.is_err() {
            // Sender dropped: cancellation can never arrive
            std::future::pending::<()>().await;
        }
    }
}

/// Resolve every string argument against memory; other value types pass through
fn resolve_arguments(arguments: &BTreeMap<String, Value>, memory: &PlanMemory) -> Result<Arguments, MemoryError> {
    let mut resolved = Arguments::new();
    for (name, value) in arguments {
        let value = match value {
            Value::String(s) => Value::String(memory.resolve(s)?),
            other => other.clone(),
        };
        resolved.insert(name.clone(), value);
    }
    Ok(resolved)
}

/// Evaluate a resolved conditional expression
///
/// Supports `lhs != rhs` and `lhs == rhs` comparisons (with "null"/"none"
/// meaning empty) and plain truthiness for anything else.
fn evaluate_conditional(expr: &str) -> bool {
    if let Some((lhs, rhs)) = expr.split_once("!=") {
        return normalize_operand(lhs) != normalize_operand(rhs);
    }
    if let Some((lhs, rhs)) = expr.split_once("==") {
        return normalize_operand(lhs) == normalize_operand(rhs);
    }
    truthy(expr)
}

/// Normalize a comparison operand: trim whitespace and quotes, lowercase,
/// and map null-ish words to the empty string
fn normalize_operand(s: &str) -> String {
    let trimmed = s.trim().trim_matches('"').trim_matches('\'').to_lowercase();
    match trimmed.as_str() {
        "null" | "none" => String::new(),
        _ => trimmed,
    }
}

/// Truthiness of a resolved expression
fn truthy(s: &str) -> bool {
    !matches!(normalize_operand(s).as_str(), "" | "false" | "0" | "no")
}

/// Derive the final user-facing message from the record list
fn build_message(
    plan: &Plan,
    records: &[ExecutionRecord],
    order: &[usize],
    halted_on: &Option<String>,
    was_cancelled: bool,
) -> String {
    // Best-effort summary: the last step (in execution order) that completed
    let last_completed = order
        .iter()
        .rev()
        .map(|&idx| &records[idx])
        .find(|r| r.status == StepStatus::Completed && r.output.as_deref().is_some_and(|o| !o.is_empty()));

    if was_cancelled {
        let mut message = "The request was cancelled before the plan finished.".to_string();
        if let Some(record) = last_completed {
            message.push_str(&format!(
                " Before stopping, step '{}' produced: {}",
                record.step_id,
                record.output.as_deref().unwrap_or_default()
            ));
        }
        return message;
    }

    if let Some(failed_id) = halted_on {
        let error = records
            .iter()
            .find(|r| &r.step_id == failed_id)
            .and_then(|r| r.error.as_deref())
            .unwrap_or("unknown error");

        let mut message = format!(
            "Sorry, I couldn't complete that request: step '{}' failed: {}.",
            failed_id, error
        );
        if let Some(record) = last_completed {
            message.push_str(&format!(
                " I did get this far - step '{}' produced: {}",
                record.step_id,
                record.output.as_deref().unwrap_or_default()
            ));
        }
        return message;
    }

    // Success: the last non-skipped step's result, or a plain acknowledgment
    // when it produced nothing displayable
    let last_ran = order.iter().rev().map(|&idx| &records[idx]).find(|r| r.status != StepStatus::Skipped);

    match last_ran {
        Some(record) if record.status == StepStatus::Completed && record.output.as_deref().is_some_and(|o| !o.is_empty()) => {
            record.output.clone().unwrap_or_default()
        }
        _ => format!("Plan complete: {}", plan.goal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReasoningConfig;
    use crate::domain::Step;
    use crate::llm::CompletionResponse;
    use crate::llm::client::mock::MockLlmClient;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Gateway stub: answers from a fixed table and records every call
    struct StubGateway {
        responses: Vec<(&'static str, Result<String, String>)>,
        calls: Mutex<Vec<(String, Arguments)>>,
        delay: Option<Duration>,
    }

    impl StubGateway {
        fn new(responses: Vec<(&'static str, Result<String, String>)>) -> Self {
            Self {
                responses,
                calls: Mutex::new(Vec::new()),
                delay: None,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn calls(&self) -> Vec<(String, Arguments)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ActionGateway for StubGateway {
        async fn execute(&self, action: &str, arguments: &Arguments) -> Result<String, ActionError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.calls.lock().unwrap().push((action.to_string(), arguments.clone()));

            for (name, outcome) in &self.responses {
                if *name == action {
                    return outcome.clone().map_err(ActionError::Handler);
                }
            }
            Err(ActionError::UnknownAction {
                name: action.to_string(),
            })
        }
    }

    fn executor_with(
        gateway: Arc<dyn ActionGateway>,
        reasoning_responses: Vec<CompletionResponse>,
    ) -> PlanExecutor {
        let reasoning = ReasoningEngine::new(
            Arc::new(MockLlmClient::new(reasoning_responses)),
            ReasoningConfig::default(),
        );
        PlanExecutor::new(gateway, reasoning, ExecutorConfig::default())
    }

    #[tokio::test]
    async fn test_execute_propagates_save_as_verbatim() {
        let gateway = Arc::new(StubGateway::new(vec![
            ("get_events", Ok("You have 1 event: Gym at 8 PM".to_string())),
            ("create_event", Ok("Created event".to_string())),
        ]));
        let executor = executor_with(gateway.clone(), vec![CompletionResponse::text("7:00 PM")]);

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
                .with_dependency("s2"),
            ],
        );

        let result = executor.execute(&plan).await.unwrap();
        assert!(result.succeeded);

        // s3's gateway call received exactly what the reasoning step returned
        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0, "create_event");
        assert_eq!(calls[1].1.get("start_time"), Some(&json!("7:00 PM")));
    }

    #[tokio::test]
    async fn test_execute_failure_halts_remaining_steps() {
        let gateway = Arc::new(StubGateway::new(vec![("get_events", Err("calendar offline".to_string()))]));
        let executor = executor_with(gateway.clone(), vec![]);

        let plan = Plan::new(
            "g",
            vec![
                Step::action("s1", "get_events", BTreeMap::new()).with_save_as("events"),
                Step::reasoning("s2", "summarize ${events}"),
                Step::reasoning("s3", "more work"),
            ],
        );

        let result = executor.execute(&plan).await.unwrap();

        assert!(!result.succeeded);
        assert_eq!(result.record("s1").unwrap().status, StepStatus::Failed);
        assert_eq!(result.record("s2").unwrap().status, StepStatus::Skipped);
        assert_eq!(result.record("s3").unwrap().status, StepStatus::Skipped);
        assert!(result.message.contains("s1"));
        assert!(result.message.contains("calendar offline"));
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_best_effort_failure_continues() {
        let gateway = Arc::new(StubGateway::new(vec![
            ("get_events", Err("calendar offline".to_string())),
            ("get_time", Ok("It's 3:00 PM.".to_string())),
        ]));
        let executor = executor_with(gateway, vec![]);

        let plan = Plan::new(
            "g",
            vec![
                Step::action("s1", "get_events", BTreeMap::new())
                    .with_save_as("events")
                    .with_best_effort(),
                Step::action("s2", "get_time", BTreeMap::new()),
            ],
        );

        let result = executor.execute(&plan).await.unwrap();

        assert!(result.succeeded);
        assert_eq!(result.record("s1").unwrap().status, StepStatus::Failed);
        assert_eq!(result.record("s2").unwrap().status, StepStatus::Completed);
        assert_eq!(result.message, "It's 3:00 PM.");
    }

    #[tokio::test]
    async fn test_execute_reference_to_best_effort_variable_fails_at_use() {
        let gateway = Arc::new(StubGateway::new(vec![("get_events", Err("offline".to_string()))]));
        let executor = executor_with(gateway, vec![]);

        let plan = Plan::new(
            "g",
            vec![
                Step::action("s1", "get_events", BTreeMap::new())
                    .with_save_as("events")
                    .with_best_effort(),
                Step::reasoning("s2", "summarize ${events}"),
            ],
        );

        let result = executor.execute(&plan).await.unwrap();

        let record = result.record("s2").unwrap();
        assert_eq!(record.status, StepStatus::Failed);
        assert!(record.error.as_deref().unwrap().contains("events"));
    }

    #[tokio::test]
    async fn test_execute_conditional_falsy_skips_without_failing() {
        let gateway = Arc::new(StubGateway::new(vec![("get_time", Ok("It's noon.".to_string()))]));
        let executor = executor_with(gateway, vec![CompletionResponse::text("")]);

        let plan = Plan::new(
            "g",
            vec![
                Step::action("s1", "get_time", BTreeMap::new()).with_save_as("now"),
                Step::reasoning("s2", "never runs").with_conditional("false"),
            ],
        );

        let result = executor.execute(&plan).await.unwrap();

        assert!(result.succeeded);
        assert_eq!(result.record("s2").unwrap().status, StepStatus::Skipped);
    }

    #[tokio::test]
    async fn test_execute_unresolvable_conditional_skips() {
        let gateway = Arc::new(StubGateway::new(vec![("get_time", Ok("It's noon.".to_string()))]));
        let executor = executor_with(gateway, vec![]);

        // ${slot} was never set: the conditional itself fails to resolve
        let plan = Plan::new(
            "g",
            vec![
                Step::action("s1", "get_time", BTreeMap::new()),
                Step::reasoning("s2", "never runs").with_conditional("${slot} != null"),
            ],
        );

        let result = executor.execute(&plan).await.unwrap();

        assert!(result.succeeded);
        let record = result.record("s2").unwrap();
        assert_eq!(record.status, StepStatus::Skipped);
        assert!(record.error.as_deref().unwrap().contains("slot"));
    }

    #[tokio::test]
    async fn test_execute_skipped_step_does_not_block_dependents() {
        let gateway = Arc::new(StubGateway::new(vec![
            ("get_time", Ok("It's noon.".to_string())),
            ("get_day", Ok("It's Friday.".to_string())),
        ]));
        let executor = executor_with(gateway, vec![]);

        let plan = Plan::new(
            "g",
            vec![
                Step::action("s1", "get_time", BTreeMap::new()),
                Step::action("s2", "get_day", BTreeMap::new()).with_conditional("false"),
                Step::action("s3", "get_time", BTreeMap::new()).with_dependency("s2"),
            ],
        );

        let result = executor.execute(&plan).await.unwrap();

        assert!(result.succeeded);
        assert_eq!(result.record("s2").unwrap().status, StepStatus::Skipped);
        // The dependent still ran; the skip only withheld the variable
        assert_eq!(result.record("s3").unwrap().status, StepStatus::Completed);
    }

    #[tokio::test]
    async fn test_execute_cycle_fails_before_any_step() {
        let gateway = Arc::new(StubGateway::new(vec![("get_time", Ok("noon".to_string()))]));
        let executor = executor_with(gateway.clone(), vec![]);

        let plan = Plan::new(
            "g",
            vec![
                Step::action("a", "get_time", BTreeMap::new()).with_dependency("b"),
                Step::action("b", "get_time", BTreeMap::new()).with_dependency("a"),
            ],
        );

        let err = executor.execute(&plan).await.unwrap_err();
        assert!(matches!(err, ExecuteError::Cycle { .. }));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_execute_cancelled_before_start_skips_everything() {
        let gateway = Arc::new(StubGateway::new(vec![("get_time", Ok("noon".to_string()))]));
        let executor = executor_with(gateway.clone(), vec![]);

        let plan = Plan::new(
            "g",
            vec![
                Step::action("s1", "get_time", BTreeMap::new()),
                Step::action("s2", "get_time", BTreeMap::new()),
            ],
        );

        let (cancel_tx, cancel_rx) = cancel_channel();
        cancel_tx.send(true).unwrap();

        let result = executor.execute_with_cancel(&plan, cancel_rx).await.unwrap();

        assert!(!result.succeeded);
        assert!(result.message.contains("cancelled"));
        assert_eq!(result.record("s1").unwrap().status, StepStatus::Skipped);
        assert_eq!(result.record("s2").unwrap().status, StepStatus::Skipped);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_execute_cancelled_mid_flight_abandons_step() {
        let gateway = Arc::new(
            StubGateway::new(vec![("get_time", Ok("noon".to_string()))]).with_delay(Duration::from_secs(10)),
        );
        let executor = executor_with(gateway, vec![]);

        let plan = Plan::new(
            "g",
            vec![
                Step::action("s1", "get_time", BTreeMap::new()),
                Step::action("s2", "get_time", BTreeMap::new()),
            ],
        );

        let (cancel_tx, cancel_rx) = cancel_channel();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = cancel_tx.send(true);
        });

        let result = executor.execute_with_cancel(&plan, cancel_rx).await.unwrap();

        assert!(!result.succeeded);
        assert_eq!(result.record("s1").unwrap().status, StepStatus::Failed);
        assert_eq!(result.record("s1").unwrap().error.as_deref(), Some("cancelled"));
        assert_eq!(result.record("s2").unwrap().status, StepStatus::Skipped);
    }

    #[tokio::test]
    async fn test_execute_step_timeout_is_a_step_failure() {
        let gateway = Arc::new(
            StubGateway::new(vec![("get_time", Ok("noon".to_string()))]).with_delay(Duration::from_millis(200)),
        );
        let reasoning = ReasoningEngine::new(Arc::new(MockLlmClient::new(vec![])), ReasoningConfig::default());
        let executor = PlanExecutor::new(gateway, reasoning, ExecutorConfig { step_timeout_ms: 20 });

        let plan = Plan::new("g", vec![Step::action("s1", "get_time", BTreeMap::new())]);

        let result = executor.execute(&plan).await.unwrap();

        assert!(!result.succeeded);
        let record = result.record("s1").unwrap();
        assert_eq!(record.status, StepStatus::Failed);
        assert!(record.error.as_deref().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_execute_success_message_uses_last_result() {
        let gateway = Arc::new(StubGateway::new(vec![("get_time", Ok("It's noon.".to_string()))]));
        let executor = executor_with(gateway, vec![]);

        let plan = Plan::new("g", vec![Step::action("s1", "get_time", BTreeMap::new())]);
        let result = executor.execute(&plan).await.unwrap();

        assert!(result.succeeded);
        assert_eq!(result.message, "It's noon.");
    }

    #[tokio::test]
    async fn test_execute_all_skipped_acknowledges_completion() {
        let gateway = Arc::new(StubGateway::new(vec![]));
        let executor = executor_with(gateway, vec![]);

        let plan = Plan::new(
            "check things",
            vec![Step::reasoning("s1", "never").with_conditional("false")],
        );
        let result = executor.execute(&plan).await.unwrap();

        assert!(result.succeeded);
        assert!(result.message.contains("Plan complete"));
    }

    #[tokio::test]
    async fn test_records_timing() {
        let gateway = Arc::new(StubGateway::new(vec![("get_time", Ok("noon".to_string()))]));
        let executor = executor_with(gateway, vec![]);

        let plan = Plan::new("g", vec![Step::action("s1", "get_time", BTreeMap::new())]);
        let result = executor.execute(&plan).await.unwrap();

        let record = result.record("s1").unwrap();
        assert!(record.started_at.is_some());
        assert!(record.finished_at.is_some());
        assert!(record.duration_ms().unwrap() >= 0);
    }

    #[test]
    fn test_evaluate_conditional_comparisons() {
        assert!(evaluate_conditional("7:00 PM != null"));
        assert!(!evaluate_conditional(" != null")); // empty lhs equals null
        assert!(evaluate_conditional("yes == yes"));
        assert!(!evaluate_conditional("yes == no"));
        assert!(evaluate_conditional("none == null"));
    }

    #[test]
    fn test_evaluate_conditional_truthiness() {
        assert!(evaluate_conditional("7:00 PM"));
        assert!(!evaluate_conditional("false"));
        assert!(!evaluate_conditional("0"));
        assert!(!evaluate_conditional("no"));
        assert!(!evaluate_conditional(""));
        assert!(!evaluate_conditional("null"));
        assert!(!evaluate_conditional("None"));
    }

    #[test]
    fn test_resolve_arguments_passthrough_non_strings() {
        let mut memory = PlanMemory::new();
        memory.set_text("slot", "7:00 PM");

        let arguments = BTreeMap::from([
            ("start_time".to_string(), json!("${slot}")),
            ("limit".to_string(), json!(3)),
        ]);

        let resolved = resolve_arguments(&arguments, &memory).unwrap();
        assert_eq!(resolved.get("start_time"), Some(&json!("7:00 PM")));
        assert_eq!(resolved.get("limit"), Some(&json!(3)));
    }
}
