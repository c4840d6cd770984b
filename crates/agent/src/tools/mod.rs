//! Tool catalog.
//!
//! Tools are named capabilities with a positional string calling
//! convention: the loop hands each tool the comma-split `<parameters>`
//! tokens and embeds whatever comes back (result or failure) into the
//! conversation. Each tool declares a static descriptor at registration
//! time; there is no runtime reflection.

pub mod demo;

pub use demo::{CheckAvailabilityTool, ClockTool, EchoTool, WeatherTool};

use async_trait::async_trait;
use std::collections::HashMap;

/// Fallback description for tools that do not provide one.
pub const NO_DESCRIPTION: &str = "No description available";

/// A single named parameter in a tool signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolParam {
    pub name: &'static str,
    pub type_tag: &'static str,
}

impl ToolParam {
    pub const fn new(name: &'static str, type_tag: &'static str) -> Self {
        Self { name, type_tag }
    }

    /// Parameter with no declared type.
    pub const fn untyped(name: &'static str) -> Self {
        Self::new(name, "any")
    }
}

type BoxedTool = Box<dyn Tool + Send + Sync>;

/// A named capability the model may invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        NO_DESCRIPTION
    }

    /// Ordered parameter signature, serialized into the system prompt.
    fn parameters(&self) -> Vec<ToolParam>;

    /// Invoke with positional string arguments.
    ///
    /// Argument validation is the tool's responsibility; any failure is
    /// reported back into the conversation rather than ending the
    /// session.
    async fn invoke(
        &self,
        args: &[String],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Registry mapping tool names to capabilities.
///
/// Iteration follows registration order, keeping the assembled prompt
/// and the unknown-tool listing stable across runs. Built once per run
/// and read-only afterwards.
pub struct ToolRegistry {
    tools: HashMap<String, BoxedTool>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool under its declared name. Re-registering a name
    /// replaces the capability but keeps its original position.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), Box::new(tool)).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Tool + Send + Sync)> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Iterate tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Tool + Send + Sync)> {
        self.order.iter().filter_map(|name| self.get(name))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
