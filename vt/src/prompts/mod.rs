//! Prompt templates for Valet
//!
//! Embedded Handlebars templates with an on-disk override directory.

pub mod embedded;
mod loader;

pub use loader::{PlanPromptContext, PromptLoader, ReasoningPromptContext};
