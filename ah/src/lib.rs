//! ActionHub - the action boundary for Valet
//!
//! Defines the catalog of actions an assistant can execute (the action
//! schema), the gateway trait the plan executor dispatches through, and a
//! registry of built-in in-memory handlers (calendar, notes, todo list,
//! clock).
//!
//! # Modules
//!
//! - [`schema`] - Action schema types and prompt rendering
//! - [`gateway`] - ActionGateway trait and ActionError
//! - [`registry`] - ActionHandler trait and ActionRegistry
//! - [`builtin`] - Built-in in-memory handlers

pub mod builtin;
pub mod gateway;
pub mod registry;
pub mod schema;

pub use builtin::builtin_registry;
pub use gateway::{ActionError, ActionGateway, Arguments};
pub use registry::{ActionHandler, ActionRegistry};
pub use schema::{ActionSchema, ActionSpec};
