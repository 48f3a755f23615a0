//! ActionHandler trait and ActionRegistry

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use crate::gateway::{ActionError, ActionGateway, Arguments};
use crate::schema::{ActionSchema, ActionSpec};

/// A single action implementation
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Action name (matches the plan's `action` field)
    fn name(&self) -> &'static str;

    /// Human-readable description, shown to the planning model
    fn description(&self) -> &'static str;

    /// Argument names that must be supplied
    fn required_args(&self) -> &'static [&'static str] {
        &[]
    }

    /// Argument names that may be supplied
    fn optional_args(&self) -> &'static [&'static str] {
        &[]
    }

    /// Execute the action
    async fn execute(&self, arguments: &Arguments) -> Result<String, ActionError>;
}

/// Dispatches actions to registered handlers
///
/// The registry is both an [`ActionGateway`] and the source of truth for
/// the [`ActionSchema`] handed to the planner, so the catalog the model
/// sees and the catalog the executor can dispatch never drift apart.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, Box<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own name
    pub fn register(&mut self, handler: Box<dyn ActionHandler>) {
        self.handlers.insert(handler.name().to_string(), handler);
    }

    /// Check if an action is registered
    pub fn has_action(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered action names
    pub fn action_names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Derive the action schema from the registered handlers
    pub fn schema(&self) -> ActionSchema {
        let mut schema = ActionSchema::new();
        for handler in self.handlers.values() {
            schema.insert(
                handler.name(),
                ActionSpec::new(handler.description(), handler.required_args(), handler.optional_args()),
            );
        }
        schema
    }

    /// Check required arguments before dispatch
    fn check_arguments(&self, handler: &dyn ActionHandler, arguments: &Arguments) -> Result<(), ActionError> {
        for arg in handler.required_args() {
            if !arguments.contains_key(*arg) {
                return Err(ActionError::MissingArgument {
                    action: handler.name().to_string(),
                    arg: arg.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ActionGateway for ActionRegistry {
    async fn execute(&self, action: &str, arguments: &Arguments) -> Result<String, ActionError> {
        debug!(%action, arg_count = arguments.len(), "dispatching action");
        let handler = self.handlers.get(action).ok_or_else(|| ActionError::UnknownAction {
            name: action.to_string(),
        })?;

        self.check_arguments(handler.as_ref(), arguments)?;
        handler.execute(arguments).await
    }
}
