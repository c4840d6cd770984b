//! Tag parser for model responses.
//!
//! The model signals intent with delimited tags inside otherwise free
//! text: `<reasoning>`, `<answer>`, `<tool>` and `<parameters>`. Each
//! tag is an independent scan over the same text; absent or malformed
//! tags come back as `None`, never as a failure.

use regex::Regex;

/// Structured intent extracted from one assistant response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    /// Free-form thought process; informational only, never drives
    /// control flow.
    pub reasoning: Option<String>,
    /// Final answer text; ends the session when present.
    pub answer: Option<String>,
    /// Name of the tool to invoke.
    pub tool: Option<String>,
    /// Raw comma-separated parameter payload for the tool call.
    pub parameters: Option<String>,
}

/// Extract tagged fields from raw response text.
///
/// `<answer>` and `<reasoning>` spans may cross newlines; `<tool>` and
/// `<parameters>` match on a single line only. The asymmetry is part of
/// the wire grammar and is kept as-is. `<parameters>` is only looked
/// for once a `<tool>` tag has been found. A response may carry both an
/// answer and a tool call; policing that is the loop's job, not the
/// parser's.
pub fn parse_response(text: &str) -> ParsedResponse {
    let first = |pattern: &str| -> Option<String> {
        Regex::new(pattern)
            .unwrap()
            .captures(text)
            .map(|c| c[1].trim().to_string())
    };

    let reasoning = first(r"(?s)<reasoning>(.*?)</reasoning>");
    let answer = first(r"(?s)<answer>(.*?)</answer>");
    let tool = first(r"<tool>(.*?)</tool>");
    let parameters = if tool.is_some() {
        first(r"<parameters>(.*?)</parameters>")
    } else {
        None
    };

    ParsedResponse {
        reasoning,
        answer,
        tool,
        parameters,
    }
}
