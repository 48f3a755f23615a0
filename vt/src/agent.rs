//! Agent - the agentic pipeline facade
//!
//! Ties the planner and the executor together for one goal: generate a
//! plan (with bounded retries), execute it, and shape failures into
//! user-facing messages. Callers always get an [`ExecutionResult`], never a
//! bare error.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use actionhub::{ActionGateway, ActionSchema};

use crate::config::Config;
use crate::domain::ExecutionResult;
use crate::executor::{CancelSignal, ExecuteError, PlanExecutor, cancel_channel};
use crate::llm::LlmClient;
use crate::planner::Planner;
use crate::reasoning::ReasoningEngine;

/// The assistant's agentic pipeline: goal in, result out
pub struct Agent {
    planner: Planner,
    executor: PlanExecutor,
    schema: ActionSchema,
}

impl Agent {
    /// Wire up the pipeline from its collaborators
    pub fn new(
        llm: Arc<dyn LlmClient>,
        gateway: Arc<dyn ActionGateway>,
        schema: ActionSchema,
        config: &Config,
    ) -> Self {
        let planner = Planner::new(llm.clone(), config.planner.clone());
        let reasoning = ReasoningEngine::new(llm, config.reasoning.clone());
        let executor = PlanExecutor::new(gateway, reasoning, config.executor.clone());

        Self {
            planner,
            executor,
            schema,
        }
    }

    /// Handle one goal without external cancellation
    pub async fn handle_goal(&self, goal: &str) -> ExecutionResult {
        let (_cancel_tx, cancel_rx) = cancel_channel();
        self.handle_goal_with_cancel(goal, cancel_rx).await
    }

    /// Handle one goal, honoring an external cancellation signal
    pub async fn handle_goal_with_cancel(&self, goal: &str, cancel: CancelSignal) -> ExecutionResult {
        let started = Instant::now();

        let plan = match self.planner.generate(goal, &self.schema).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "plan generation failed");
                return failure_result(
                    goal,
                    format!("Sorry, I couldn't build a plan for that request. ({})", e),
                );
            }
        };

        let result = match self.executor.execute_with_cancel(&plan, cancel).await {
            Ok(result) => result,
            Err(e @ ExecuteError::Cycle { .. }) => {
                warn!(error = %e, "plan rejected before execution");
                failure_result(
                    goal,
                    "Sorry, the plan I built has inconsistent step dependencies, so I didn't run it.".to_string(),
                )
            }
        };

        info!(
            succeeded = result.succeeded,
            duration_ms = started.elapsed().as_millis() as u64,
            "goal handled"
        );
        result
    }
}

/// An ExecutionResult for requests that never reached execution
fn failure_result(goal: &str, message: String) -> ExecutionResult {
    ExecutionResult {
        run_id: format!("run-{}", &Uuid::now_v7().simple().to_string()[..12]),
        goal: goal.to_string(),
        succeeded: false,
        message,
        records: Vec::new(),
    }
}
