//! Todo list actions
//!
//! Items are addressed by their 1-based position as shown by `show_todo`.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::gateway::{ActionError, Arguments, require_str};
use crate::registry::ActionHandler;

/// Shared in-memory todo list
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    items: Arc<Mutex<Vec<String>>>,
}

impl TodoStore {
    /// Seed the list with an item (used by tests and demos)
    pub async fn add(&self, item: impl Into<String>) {
        self.items.lock().await.push(item.into());
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }
}

/// Add an item to the todo list
pub struct AddTodoHandler {
    store: TodoStore,
}

impl AddTodoHandler {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for AddTodoHandler {
    fn name(&self) -> &'static str {
        "add_todo"
    }

    fn description(&self) -> &'static str {
        "Add a new task or item to your todo list. The todo list is for \
         things you need to do, not for storing general notes."
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["item"]
    }

    async fn execute(&self, arguments: &Arguments) -> Result<String, ActionError> {
        let item = require_str(self.name(), arguments, "item")?;
        self.store.items.lock().await.push(item.to_string());
        Ok(format!("Added '{}' to your todo list.", item))
    }
}

/// Show the todo list as a numbered list
pub struct ShowTodoHandler {
    store: TodoStore,
}

impl ShowTodoHandler {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for ShowTodoHandler {
    fn name(&self) -> &'static str {
        "show_todo"
    }

    fn description(&self) -> &'static str {
        "Show your current todo list. Use this to see your todo list, not your notes."
    }

    async fn execute(&self, _arguments: &Arguments) -> Result<String, ActionError> {
        let items = self.store.items.lock().await;
        if items.is_empty() {
            return Ok("Your todo list is empty.".to_string());
        }

        let listing = items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(listing)
    }
}

/// Clear the todo list
pub struct ClearTodoHandler {
    store: TodoStore,
}

impl ClearTodoHandler {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for ClearTodoHandler {
    fn name(&self) -> &'static str {
        "clear_todo"
    }

    fn description(&self) -> &'static str {
        "Clear all tasks and items from your todo list. This does not affect your notes."
    }

    async fn execute(&self, _arguments: &Arguments) -> Result<String, ActionError> {
        let mut items = self.store.items.lock().await;
        let count = items.len();
        items.clear();
        Ok(format!("Cleared {} item(s) from your todo list.", count))
    }
}

/// Remove one item by its 1-based number
pub struct RemoveTodoItemHandler {
    store: TodoStore,
}

impl RemoveTodoItemHandler {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }

    fn parse_number(&self, value: &Value) -> Result<usize, ActionError> {
        value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
            .map(|n| n as usize)
            .ok_or_else(|| ActionError::InvalidArgument {
                action: self.name().to_string(),
                arg: "item_number".to_string(),
                reason: "expected a positive number".to_string(),
            })
    }
}

#[async_trait]
impl ActionHandler for RemoveTodoItemHandler {
    fn name(&self) -> &'static str {
        "remove_todo_item"
    }

    fn description(&self) -> &'static str {
        "Remove a specific task or item from your todo list by its number. \
         This does not affect your notes."
    }

    fn required_args(&self) -> &'static [&'static str] {
        &["item_number"]
    }

    async fn execute(&self, arguments: &Arguments) -> Result<String, ActionError> {
        let number = match arguments.get("item_number") {
            Some(value) => self.parse_number(value)?,
            None => {
                return Err(ActionError::MissingArgument {
                    action: self.name().to_string(),
                    arg: "item_number".to_string(),
                });
            }
        };

        let mut items = self.store.items.lock().await;
        if number == 0 || number > items.len() {
            return Err(ActionError::InvalidArgument {
                action: self.name().to_string(),
                arg: "item_number".to_string(),
                reason: format!("no item number {} (list has {} items)", number, items.len()),
            });
        }

        let removed = items.remove(number - 1);
        Ok(format!("Removed '{}' from your todo list.", removed))
    }
}
