//! System prompt assembly.

use crate::tools::ToolRegistry;

/// Merge the base instruction prompt with the serialized tool catalog.
///
/// With an empty catalog the base prompt comes back unchanged. The
/// result becomes the session's single system message; it is assembled
/// once at session start and never recomputed mid-session.
pub fn assemble_system_prompt(base: &str, tools: &ToolRegistry) -> String {
    if tools.is_empty() {
        return base.to_string();
    }

    let mut prompt = format!("{base}\n\nAvailable Tools:\n");
    for tool in tools.iter() {
        let params = tool
            .parameters()
            .iter()
            .map(|p| format!("{}: {}", p.name, p.type_tag))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!(
            "- {}({}): {}\n",
            tool.name(),
            params,
            tool.description()
        ));
    }
    prompt
}
