//! reagent command implementations

use anyhow::{Context, Result};
use std::io::Write;

use reagent_agent::tools::{CheckAvailabilityTool, ClockTool, EchoTool, ToolRegistry, WeatherTool};
use reagent_agent::AgentLoop;
use reagent_config::Config;
use reagent_provider::OpenRouterProvider;

/// Base instruction prompt. The serialized tool catalog is appended to
/// it at session start.
const BASE_PROMPT: &str = "You are a helpful assistant.

When you need information, you should use available tools.
When you have a final answer, provide it in <answer>your answer here</answer> tags.
When you need to use a tool, specify it as <tool>tool_name</tool> with <parameters>param1,param2</parameters>.
You may explain your thinking in <reasoning>your reasoning here</reasoning> tags before acting.

Available tools will be listed below.";

fn default_registry() -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools.register(WeatherTool);
    tools.register(CheckAvailabilityTool);
    tools.register(ClockTool);
    tools.register(EchoTool);
    tools
}

/// Write a default config file
pub async fn init_command() -> Result<()> {
    let path = reagent_config::config_path();
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    Config::default().save().await?;
    println!("Wrote default config to {}", path.display());
    println!("Set provider.api_key there, or export REAGENT_API_KEY.");
    Ok(())
}

/// List the built-in tools
pub fn tools_command() -> Result<()> {
    let tools = default_registry();

    println!("Registered tools:");
    for tool in tools.iter() {
        let params = tool
            .parameters()
            .iter()
            .map(|p| format!("{}: {}", p.name, p.type_tag))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {}({}): {}", tool.name(), params, tool.description());
    }
    Ok(())
}

/// Ask the agent a question, one-shot or interactively
pub async fn ask_command(
    question: Option<String>,
    max_iterations: Option<u32>,
    model: Option<String>,
) -> Result<()> {
    let config = Config::load().await?;

    let api_key = config
        .api_key()
        .context("No API key configured. Set one in ~/.reagent/config.json or export REAGENT_API_KEY")?;
    let model = model.unwrap_or_else(|| config.model());
    let max_iterations = max_iterations.unwrap_or_else(|| config.max_iterations());

    let provider = OpenRouterProvider::new(api_key, config.api_base(), Some(model.clone()));

    let mut agent = AgentLoop::new(
        provider,
        model,
        BASE_PROMPT,
        default_registry(),
        max_iterations,
    );
    agent.set_require_reasoning(config.require_reasoning());

    match question {
        Some(q) => {
            let answer = agent.run(&q).await?;
            println!("{}", answer);
        }
        None => {
            println!("Interactive mode (type 'exit' to quit)");

            loop {
                print!("> ");
                std::io::stdout().flush()?;

                let mut input = String::new();
                std::io::stdin().read_line(&mut input)?;

                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                if input == "exit" || input == "quit" {
                    break;
                }

                let answer = agent.run(input).await?;
                println!("{}\n", answer);
            }
        }
    }

    Ok(())
}
