//! Agent loop - core processing engine

use std::sync::Arc;

use tracing::{debug, info, warn};

use reagent_provider::{ChatParams, Message, Provider};

use crate::parser::parse_response;
use crate::prompt::assemble_system_prompt;
use crate::tools::ToolRegistry;
use crate::Result;

/// Sentinel returned when the iteration budget is spent without a
/// well-formed answer. A graceful "no answer produced", distinct from a
/// failure.
pub const NO_ANSWER: &str = "No answer could be found";

/// Drives one model against one tool catalog until the model commits to
/// an answer or the iteration budget runs out.
///
/// Each session owns its own transcript; an `AgentLoop` holds no
/// per-session state, so independent sessions can run concurrently
/// against the same instance without cross-talk.
pub struct AgentLoop<P: Provider> {
    provider: Arc<P>,
    model: String,
    base_prompt: String,
    tools: ToolRegistry,
    max_iterations: u32,
    require_reasoning: bool,
}

impl<P: Provider> AgentLoop<P> {
    /// Create a new agent loop
    pub fn new(
        provider: P,
        model: impl Into<String>,
        base_prompt: impl Into<String>,
        tools: ToolRegistry,
        max_iterations: u32,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            model: model.into(),
            base_prompt: base_prompt.into(),
            tools,
            max_iterations,
            require_reasoning: false,
        }
    }

    /// Demand `<reasoning>` tags when the model emits neither an answer
    /// nor a tool call.
    pub fn set_require_reasoning(&mut self, require: bool) {
        self.require_reasoning = require;
    }

    /// Run a fresh session for one user request.
    ///
    /// Seeds the transcript with the assembled system prompt and the
    /// request, then drives the loop to completion.
    pub async fn run(&self, user_request: &str) -> Result<String> {
        let system_prompt = assemble_system_prompt(&self.base_prompt, &self.tools);
        let mut messages = vec![Message::system(system_prompt), Message::user(user_request)];
        self.run_session(&mut messages).await
    }

    /// Run the loop over an existing transcript.
    ///
    /// The transcript must already carry the system message first. It is
    /// appended to in place, one assistant message per model call plus
    /// one user message per non-terminal turn, so callers can inspect
    /// the full turn history afterwards.
    pub async fn run_session(&self, messages: &mut Vec<Message>) -> Result<String> {
        for iteration in 1..=self.max_iterations {
            debug!("iteration {}/{}", iteration, self.max_iterations);

            let params = ChatParams {
                model: self.model.clone(),
                messages: messages.clone(),
                ..Default::default()
            };
            let response = self.provider.chat(params).await?;
            let text = response.content;

            // The raw response always joins the history, even when it
            // turns out to be malformed.
            messages.push(Message::assistant(text.clone()));

            let parsed = parse_response(&text);

            if let Some(reasoning) = &parsed.reasoning {
                debug!("reasoning: {}", reasoning);
            }

            // Answer beats tool when a response carries both.
            if let Some(answer) = parsed.answer {
                info!("answer after {} iteration(s)", iteration);
                return Ok(answer);
            }

            if let Some(tool_name) = parsed.tool {
                let reply = self
                    .dispatch_tool(&tool_name, parsed.parameters.as_deref())
                    .await;
                messages.push(reply);
                continue;
            }

            messages.push(Message::user(
                self.corrective_message(parsed.reasoning.is_some()),
            ));
        }

        warn!("maximum iterations reached without a final answer");
        Ok(NO_ANSWER.to_string())
    }

    /// Resolve and invoke one tool call, converting every outcome into
    /// the user message the model sees next turn.
    async fn dispatch_tool(&self, name: &str, raw_params: Option<&str>) -> Message {
        let Some(tool) = self.tools.get(name) else {
            warn!("unknown tool requested: {}", name);
            return Message::user(format!(
                "Tool '{}' not found. Available tools: {}",
                name,
                self.tools.names().join(", ")
            ));
        };

        let args = split_parameters(raw_params);
        info!("invoking tool '{}' with {} argument(s)", name, args.len());

        match tool.invoke(&args).await {
            Ok(result) => {
                debug!("tool '{}' returned: {}", name, result);
                Message::user(format!("Tool '{}' returned: {}", name, result))
            }
            Err(e) => {
                warn!("tool '{}' failed: {}", name, e);
                Message::user(format!("Error executing tool '{}': {}", name, e))
            }
        }
    }

    fn corrective_message(&self, has_reasoning: bool) -> String {
        if self.require_reasoning && !has_reasoning {
            "Please provide your reasoning in <reasoning> tags, and either an <answer> or a <tool> call."
                .to_string()
        } else if self.require_reasoning {
            "Please provide either an <answer> or a <tool> call based on your reasoning."
                .to_string()
        } else {
            "Please provide either an <answer> or a <tool> call.".to_string()
        }
    }
}

/// Split a raw `<parameters>` payload into positional arguments.
///
/// Empty or absent input means zero arguments, not one empty string. A
/// malformed payload (say, a trailing comma) still splits; rejecting
/// the resulting tokens is up to the tool.
fn split_parameters(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(s) if !s.is_empty() => s.split(',').map(|p| p.trim().to_string()).collect(),
        _ => Vec::new(),
    }
}
