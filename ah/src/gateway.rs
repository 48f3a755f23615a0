//! ActionGateway trait and error types

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Resolved arguments for one action invocation
///
/// Values are plain JSON values; by the time a gateway sees them, every
/// `${...}` template has already been substituted by the executor.
pub type Arguments = HashMap<String, Value>;

/// Errors that can occur while executing an action
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Unknown action: {name}")]
    UnknownAction { name: String },

    #[error("Missing required argument '{arg}' for action '{action}'")]
    MissingArgument { action: String, arg: String },

    #[error("Invalid argument '{arg}' for action '{action}': {reason}")]
    InvalidArgument { action: String, arg: String, reason: String },

    #[error("{0}")]
    Handler(String),
}

/// Executes a named action with fully resolved arguments
///
/// This is the seam between the plan executor and the concrete services
/// (calendar, notes, todo). Implementations are stateless from the
/// executor's point of view; any shared-resource coordination is their own
/// concern.
#[async_trait]
pub trait ActionGateway: Send + Sync {
    /// Execute one action and return its user-displayable result text
    async fn execute(&self, action: &str, arguments: &Arguments) -> Result<String, ActionError>;
}

/// Fetch a required string argument, or fail with MissingArgument
pub fn require_str<'a>(action: &str, arguments: &'a Arguments, arg: &str) -> Result<&'a str, ActionError> {
    match arguments.get(arg) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s),
        Some(other) if !other.is_null() => Err(ActionError::InvalidArgument {
            action: action.to_string(),
            arg: arg.to_string(),
            reason: format!("expected a non-empty string, got {}", other),
        }),
        _ => Err(ActionError::MissingArgument {
            action: action.to_string(),
            arg: arg.to_string(),
        }),
    }
}

/// Fetch an optional string argument
pub fn optional_str<'a>(arguments: &'a Arguments, arg: &str) -> Option<&'a str> {
    match arguments.get(arg) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_str_present() {
        let mut args = Arguments::new();
        args.insert("title".to_string(), json!("dinner"));

        assert_eq!(require_str("create_event", &args, "title").unwrap(), "dinner");
    }

    #[test]
    fn test_require_str_missing() {
        let args = Arguments::new();
        let err = require_str("create_event", &args, "title").unwrap_err();
        assert!(matches!(err, ActionError::MissingArgument { .. }));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_require_str_wrong_type() {
        let mut args = Arguments::new();
        args.insert("title".to_string(), json!(42));

        let err = require_str("create_event", &args, "title").unwrap_err();
        assert!(matches!(err, ActionError::InvalidArgument { .. }));
    }

    #[test]
    fn test_optional_str() {
        let mut args = Arguments::new();
        args.insert("date".to_string(), json!("today"));

        assert_eq!(optional_str(&args, "date"), Some("today"));
        assert_eq!(optional_str(&args, "limit"), None);
    }
}
