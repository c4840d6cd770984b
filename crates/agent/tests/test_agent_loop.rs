//! End-to-end tests for the agent loop over a scripted provider.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reagent_agent::tools::{EchoTool, Tool, ToolParam, ToolRegistry};
use reagent_agent::{assemble_system_prompt, AgentError, AgentLoop, NO_ANSWER};
use reagent_provider::{ChatParams, ChatResponse, Message, Provider, ProviderError, Role};

/// Provider that replays a fixed sequence of canned responses and
/// counts how many times it was called.
struct ScriptedProvider {
    script: Mutex<VecDeque<String>>,
    calls: Arc<AtomicU32>,
}

impl ScriptedProvider {
    fn new<I>(script: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            script: Mutex::new(script.into_iter().map(Into::into).collect()),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    fn call_counter(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn chat(&self, _params: ChatParams) -> Result<ChatResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ProviderError::Api("script exhausted".to_string()))?;
        Ok(ChatResponse::text(next))
    }

    fn default_model(&self) -> String {
        "scripted".to_string()
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// Provider that fails every call, for the fatal-transport path.
struct BrokenProvider;

#[async_trait]
impl Provider for BrokenProvider {
    async fn chat(&self, _params: ChatParams) -> Result<ChatResponse, ProviderError> {
        Err(ProviderError::Api("connection reset".to_string()))
    }

    fn default_model(&self) -> String {
        "broken".to_string()
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Tool that records every argument list it receives.
#[derive(Clone)]
struct RecordingTool {
    invocations: Arc<Mutex<Vec<Vec<String>>>>,
}

impl RecordingTool {
    fn new() -> Self {
        Self {
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn invocations(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        self.invocations.clone()
    }
}

#[async_trait]
impl Tool for RecordingTool {
    fn name(&self) -> &str {
        "record"
    }

    fn description(&self) -> &str {
        "Records its arguments."
    }

    fn parameters(&self) -> Vec<ToolParam> {
        vec![ToolParam::untyped("args")]
    }

    async fn invoke(
        &self,
        args: &[String],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.invocations.lock().unwrap().push(args.to_vec());
        Ok("recorded".to_string())
    }
}

/// Tool that always fails.
struct FailingTool;

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        "fail"
    }

    fn description(&self) -> &str {
        "Always fails."
    }

    fn parameters(&self) -> Vec<ToolParam> {
        vec![ToolParam::untyped("input")]
    }

    async fn invoke(
        &self,
        _args: &[String],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err("boom".into())
    }
}

fn seeded_transcript(tools: &ToolRegistry, request: &str) -> Vec<Message> {
    vec![
        Message::system(assemble_system_prompt("You are a helpful assistant.", tools)),
        Message::user(request),
    ]
}

fn echo_registry() -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools.register(EchoTool);
    tools
}

// ========== Scenario Tests ==========

#[tokio::test]
async fn test_echo_scenario_answers_after_two_iterations() {
    let provider = ScriptedProvider::new([
        "<tool>echo</tool><parameters>hi</parameters>",
        "<answer>hi</answer>",
    ]);
    let calls = provider.call_counter();

    let agent = AgentLoop::new(
        provider,
        "test-model",
        "You are a helpful assistant.",
        echo_registry(),
        10,
    );

    let answer = agent.run("say hi").await.unwrap();
    assert_eq!(answer, "hi");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_exhaustion_with_single_iteration_budget() {
    let provider = ScriptedProvider::new(["no tags at all"]);
    let calls = provider.call_counter();

    let agent = AgentLoop::new(provider, "test-model", "Base.", echo_registry(), 1);

    let answer = agent.run("anything").await.unwrap();
    assert_eq!(answer, NO_ANSWER);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// ========== P1: answer precedence ==========

#[tokio::test]
async fn test_answer_beats_tool_in_same_response() {
    let recorder = RecordingTool::new();
    let invocations = recorder.invocations();

    let mut tools = ToolRegistry::new();
    tools.register(recorder);

    let provider = ScriptedProvider::new([
        "<reasoning>doing both</reasoning>\
         <tool>record</tool><parameters>x</parameters>\
         <answer>final</answer>",
    ]);
    let calls = provider.call_counter();

    let agent = AgentLoop::new(provider, "test-model", "Base.", tools, 10);

    let answer = agent.run("go").await.unwrap();
    assert_eq!(answer, "final");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(invocations.lock().unwrap().is_empty());
}

// ========== P2: parameter round-trip ==========

#[tokio::test]
async fn test_parameters_are_split_and_trimmed() {
    let recorder = RecordingTool::new();
    let invocations = recorder.invocations();

    let mut tools = ToolRegistry::new();
    tools.register(recorder);

    let provider = ScriptedProvider::new([
        "<tool>record</tool><parameters>a, b ,c</parameters>",
        "<answer>done</answer>",
    ]);

    let agent = AgentLoop::new(provider, "test-model", "Base.", tools, 10);
    agent.run("go").await.unwrap();

    let recorded = invocations.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0], vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_empty_parameters_mean_zero_arguments() {
    let recorder = RecordingTool::new();
    let invocations = recorder.invocations();

    let mut tools = ToolRegistry::new();
    tools.register(recorder);

    let provider = ScriptedProvider::new([
        "<tool>record</tool><parameters></parameters>",
        "<tool>record</tool>",
        "<answer>done</answer>",
    ]);

    let agent = AgentLoop::new(provider, "test-model", "Base.", tools, 10);
    agent.run("go").await.unwrap();

    let recorded = invocations.lock().unwrap();
    assert_eq!(recorded.len(), 2);
    assert!(recorded[0].is_empty());
    assert!(recorded[1].is_empty());
}

// ========== P3: unknown tool recovery ==========

#[tokio::test]
async fn test_unknown_tool_reports_catalog_and_continues() {
    let mut tools = ToolRegistry::new();
    tools.register(EchoTool);
    tools.register(RecordingTool::new());
    let mut messages = seeded_transcript(&tools, "go");

    let provider = ScriptedProvider::new([
        "<tool>missing</tool><parameters>x</parameters>",
        "<answer>recovered</answer>",
    ]);

    let agent = AgentLoop::new(provider, "test-model", "Base.", tools, 10);
    let answer = agent.run_session(&mut messages).await.unwrap();

    assert_eq!(answer, "recovered");
    assert_eq!(
        messages[3].content,
        "Tool 'missing' not found. Available tools: echo, record"
    );
    assert_eq!(messages[3].role, Role::User);
}

// ========== P4: tool failure recovery ==========

#[tokio::test]
async fn test_tool_failure_is_recoverable() {
    let mut tools = ToolRegistry::new();
    tools.register(FailingTool);
    let mut messages = seeded_transcript(&tools, "go");

    let provider = ScriptedProvider::new([
        "<tool>fail</tool><parameters>x</parameters>",
        "<answer>moved on</answer>",
    ]);

    let agent = AgentLoop::new(provider, "test-model", "Base.", tools, 10);
    let answer = agent.run_session(&mut messages).await.unwrap();

    assert_eq!(answer, "moved on");
    assert_eq!(messages[3].content, "Error executing tool 'fail': boom");
    assert_eq!(messages[3].role, Role::User);
}

// ========== P5: exhaustion sentinel and transcript shape ==========

#[tokio::test]
async fn test_exhaustion_appends_two_messages_per_iteration() {
    let provider = ScriptedProvider::new(["nothing", "still nothing", "nope"]);
    let calls = provider.call_counter();

    let tools = echo_registry();
    let mut messages = seeded_transcript(&tools, "go");

    let agent = AgentLoop::new(provider, "test-model", "Base.", echo_registry(), 3);
    let answer = agent.run_session(&mut messages).await.unwrap();

    assert_eq!(answer, NO_ANSWER);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // system + user seed, then assistant + corrective per iteration
    assert_eq!(messages.len(), 2 + 2 * 3);
    assert_eq!(messages[0].role, Role::System);
    for i in 0..3 {
        assert_eq!(messages[2 + 2 * i].role, Role::Assistant);
        assert_eq!(messages[3 + 2 * i].role, Role::User);
        assert_eq!(
            messages[3 + 2 * i].content,
            "Please provide either an <answer> or a <tool> call."
        );
    }
}

// ========== P6: reasoning is a side channel ==========

#[tokio::test]
async fn test_reasoning_does_not_change_outcome() {
    let with_reasoning = ScriptedProvider::new([
        "<reasoning>let me echo</reasoning><tool>echo</tool><parameters>hi</parameters>",
        "<reasoning>got it</reasoning><answer>hi</answer>",
    ]);
    let without_reasoning = ScriptedProvider::new([
        "<tool>echo</tool><parameters>hi</parameters>",
        "<answer>hi</answer>",
    ]);

    let agent_a = AgentLoop::new(with_reasoning, "test-model", "Base.", echo_registry(), 10);
    let agent_b = AgentLoop::new(
        without_reasoning,
        "test-model",
        "Base.",
        echo_registry(),
        10,
    );

    assert_eq!(
        agent_a.run("say hi").await.unwrap(),
        agent_b.run("say hi").await.unwrap()
    );
}

// ========== Corrective prompting ==========

#[tokio::test]
async fn test_require_reasoning_corrective_variants() {
    let provider = ScriptedProvider::new([
        "just prose",
        "<reasoning>thinking</reasoning>",
        "<answer>ok</answer>",
    ]);

    let tools = echo_registry();
    let mut messages = seeded_transcript(&tools, "go");

    let mut agent = AgentLoop::new(provider, "test-model", "Base.", echo_registry(), 10);
    agent.set_require_reasoning(true);

    let answer = agent.run_session(&mut messages).await.unwrap();
    assert_eq!(answer, "ok");
    assert_eq!(
        messages[3].content,
        "Please provide your reasoning in <reasoning> tags, and either an <answer> or a <tool> call."
    );
    assert_eq!(
        messages[5].content,
        "Please provide either an <answer> or a <tool> call based on your reasoning."
    );
}

// ========== Transcript invariants ==========

#[tokio::test]
async fn test_malformed_response_still_joins_history() {
    let provider = ScriptedProvider::new(["garbled output", "<answer>fine</answer>"]);

    let tools = echo_registry();
    let mut messages = seeded_transcript(&tools, "go");

    let agent = AgentLoop::new(provider, "test-model", "Base.", echo_registry(), 10);
    agent.run_session(&mut messages).await.unwrap();

    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(messages[2].content, "garbled output");
    // Terminal answer turn appends only the assistant message.
    assert_eq!(messages.last().unwrap().content, "<answer>fine</answer>");
}

// ========== Fatal transport path ==========

#[tokio::test]
async fn test_provider_failure_propagates() {
    let agent = AgentLoop::new(BrokenProvider, "test-model", "Base.", echo_registry(), 10);

    let result = agent.run("go").await;
    assert!(matches!(result, Err(AgentError::Provider(_))));
}
