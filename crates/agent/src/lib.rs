//! Tag-grammar agent loop.
//!
//! A minimal ReAct runtime: the model decides each turn between emitting
//! a final `<answer>` or invoking a registered tool with
//! `<tool>`/`<parameters>` tags, and the loop drives that conversation
//! to convergence within a fixed iteration budget.

use thiserror::Error;

pub mod loop_agent;
pub mod parser;
pub mod prompt;
pub mod tools;

pub use loop_agent::{AgentLoop, NO_ANSWER};
pub use parser::{parse_response, ParsedResponse};
pub use prompt::assemble_system_prompt;
pub use tools::{Tool, ToolParam, ToolRegistry};

/// Agent errors
///
/// Unknown tools, tool failures and malformed responses are not errors
/// at this level: they are reported back into the conversation and the
/// loop keeps going. Only the model-call boundary can abort a session.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("provider request failed: {0}")]
    Provider(#[from] reagent_provider::ProviderError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
