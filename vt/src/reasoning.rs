//! Reasoning Engine - executes reasoning steps over plan memory
//!
//! A reasoning step is one LLM call combining a natural-language
//! instruction with a textual rendering of the current memory snapshot. The
//! raw completion is normalized into a scalar text result: markdown fences
//! and surrounding quotes stripped, whitespace runs collapsed. The engine
//! is stateless across calls.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::ReasoningConfig;
use crate::llm::{CompletionRequest, LlmClient, LlmError, Message};
use crate::memory::PlanMemory;
use crate::prompts::{PromptLoader, ReasoningPromptContext};

/// Sentinel the model returns when the data cannot support the instruction
const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";

/// Errors that can occur during a reasoning step
#[derive(Debug, Error)]
pub enum ReasoningError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Failed to render reasoning prompt: {0}")]
    Template(String),

    #[error("Model returned no usable content")]
    Empty,

    #[error("Model could not complete the instruction with the available data")]
    InsufficientData,
}

/// System prompt for reasoning steps
const REASONING_SYSTEM_PROMPT: &str = "You are a reasoning engine. Provide concise, accurate responses.";

/// Executes reasoning steps using the LLM and the current memory snapshot
pub struct ReasoningEngine {
    llm: Arc<dyn LlmClient>,
    config: ReasoningConfig,
    prompts: PromptLoader,
}

impl ReasoningEngine {
    /// Create a new engine with embedded prompts
    pub fn new(llm: Arc<dyn LlmClient>, config: ReasoningConfig) -> Self {
        Self {
            llm,
            config,
            prompts: PromptLoader::embedded_only(),
        }
    }

    /// Create an engine with a custom prompt loader
    pub fn with_prompts(llm: Arc<dyn LlmClient>, config: ReasoningConfig, prompts: PromptLoader) -> Self {
        Self { llm, config, prompts }
    }

    /// Execute one reasoning instruction against the memory snapshot
    pub async fn execute(&self, instruction: &str, memory: &PlanMemory) -> Result<String, ReasoningError> {
        debug!(instruction_len = instruction.len(), variables = memory.len(), "executing reasoning step");

        let prompt = self
            .prompts
            .render(
                "reasoning",
                &ReasoningPromptContext {
                    instruction: instruction.to_string(),
                    memory: memory.render_for_prompt(),
                },
            )
            .map_err(|e| ReasoningError::Template(e.to_string()))?;

        let request = CompletionRequest {
            system_prompt: REASONING_SYSTEM_PROMPT.to_string(),
            messages: vec![Message::user(prompt)],
            tools: vec![],
            max_tokens: self.config.max_tokens,
        };

        let response = self.llm.complete(request).await?;
        let raw = response.content.ok_or(ReasoningError::Empty)?;
        let result = normalize(&raw);

        if result.is_empty() {
            return Err(ReasoningError::Empty);
        }
        if result.eq_ignore_ascii_case(INSUFFICIENT_DATA) {
            return Err(ReasoningError::InsufficientData);
        }

        info!(result_len = result.len(), "reasoning step produced result");
        Ok(result)
    }
}

/// Normalize a raw completion into a scalar text result
///
/// Strips markdown code fences and one layer of surrounding quotes, then
/// collapses runs of whitespace into single spaces.
fn normalize(raw: &str) -> String {
    let mut text = raw.trim();

    // Strip a markdown fence, with or without a language tag
    if text.starts_with("```") {
        text = text.trim_start_matches("```");
        if let Some(newline) = text.find('\n') {
            // Drop a language tag on the opening fence line
            let first_line = &text[..newline];
            if !first_line.contains(' ') && first_line.len() < 20 {
                text = &text[newline + 1..];
            }
        }
        text = text.trim_end_matches("```").trim();
    }

    // Strip one layer of matching surrounding quotes
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            text = &text[1..text.len() - 1];
        }
    }

    // Collapse whitespace runs
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
