//! Execution record types
//!
//! Every step produces exactly one [`ExecutionRecord`] regardless of
//! outcome; the full record list rides along with the final message in
//! [`ExecutionResult`] for logging and observability by the surrounding
//! system.

use serde::{Deserialize, Serialize};

/// Current Unix timestamp in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Step status over its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not yet dispatched
    #[default]
    Pending,
    /// Currently dispatched
    Running,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
    /// Guard was falsy, plan aborted earlier, or request cancelled
    Skipped,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Outcome of one step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Step id this record belongs to
    pub step_id: String,

    /// Final status
    pub status: StepStatus,

    /// Dispatch start (Unix milliseconds); None if never dispatched
    pub started_at: Option<i64>,

    /// Dispatch end (Unix milliseconds); None if never dispatched
    pub finished_at: Option<i64>,

    /// Step result text on success
    pub output: Option<String>,

    /// Error text on failure, or the skip reason
    pub error: Option<String>,
}

impl ExecutionRecord {
    /// Create a pending record for a step
    pub fn pending(step_id: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            status: StepStatus::Pending,
            started_at: None,
            finished_at: None,
            output: None,
            error: None,
        }
    }

    /// Mark the record running, stamping the start time
    pub fn start(&mut self) {
        self.status = StepStatus::Running;
        self.started_at = Some(now_ms());
    }

    /// Mark the record completed with its output, stamping the finish time
    pub fn complete(&mut self, output: impl Into<String>) {
        self.status = StepStatus::Completed;
        self.finished_at = Some(now_ms());
        self.output = Some(output.into());
    }

    /// Mark the record failed with its error, stamping the finish time
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = StepStatus::Failed;
        self.finished_at = Some(now_ms());
        self.error = Some(error.into());
    }

    /// Mark the record skipped with a reason
    pub fn skip(&mut self, reason: impl Into<String>) {
        self.status = StepStatus::Skipped;
        self.error = Some(reason.into());
    }

    /// Wall-clock duration of the dispatch, if it ran
    pub fn duration_ms(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// Final outcome of one plan execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Unique id for this execution run
    pub run_id: String,

    /// Goal of the executed plan
    pub goal: String,

    /// Whether every non-best-effort step completed or was legitimately skipped
    pub succeeded: bool,

    /// Final user-facing message
    pub message: String,

    /// One record per plan step, in definition order
    pub records: Vec<ExecutionRecord>,
}

impl ExecutionResult {
    /// Record for a given step id
    pub fn record(&self, step_id: &str) -> Option<&ExecutionRecord> {
        self.records.iter().find(|r| r.step_id == step_id)
    }
}
