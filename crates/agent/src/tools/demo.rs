//! Built-in demonstration tools.
//!
//! Small deterministic tools used by the bundled CLI and the test
//! suites. Real deployments register their own capabilities; the
//! calling convention is identical.

use async_trait::async_trait;
use chrono::Local;

use super::{Tool, ToolParam};

type ToolError = Box<dyn std::error::Error + Send + Sync>;

fn expect_args(name: &str, expected: usize, args: &[String]) -> Result<(), ToolError> {
    if args.len() != expected {
        return Err(format!(
            "{} expects {} argument(s), got {}",
            name,
            expected,
            args.len()
        )
        .into());
    }
    Ok(())
}

/// Canned weather lookup.
pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Tool to get the current weather for a location. \
         Parameters: location (string) - the city or location to get weather for. \
         Returns the current temperature and conditions."
    }

    fn parameters(&self) -> Vec<ToolParam> {
        vec![ToolParam::new("location", "string")]
    }

    async fn invoke(&self, args: &[String]) -> Result<String, ToolError> {
        expect_args(self.name(), 1, args)?;
        Ok("80 degrees fahrenheit, clear skies".to_string())
    }
}

/// Canned activity availability check.
pub struct CheckAvailabilityTool;

#[async_trait]
impl Tool for CheckAvailabilityTool {
    fn name(&self) -> &str {
        "check_availability"
    }

    fn description(&self) -> &str {
        "Tool to check whether an activity can currently be booked. \
         Parameters: activity (string) - the activity to check. \
         Returns the booking availability for the activity."
    }

    fn parameters(&self) -> Vec<ToolParam> {
        vec![ToolParam::new("activity", "string")]
    }

    async fn invoke(&self, args: &[String]) -> Result<String, ToolError> {
        expect_args(self.name(), 1, args)?;
        Ok(format!("{} is available to book", args[0]))
    }
}

/// Echoes its argument back.
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Tool to echo a piece of text back verbatim. \
         Parameters: text (string) - the text to repeat."
    }

    fn parameters(&self) -> Vec<ToolParam> {
        vec![ToolParam::new("text", "string")]
    }

    async fn invoke(&self, args: &[String]) -> Result<String, ToolError> {
        expect_args(self.name(), 1, args)?;
        Ok(args[0].clone())
    }
}

/// Reports the local date and time. Takes no parameters.
pub struct ClockTool;

#[async_trait]
impl Tool for ClockTool {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Tool to get the current local date and time. Takes no parameters."
    }

    fn parameters(&self) -> Vec<ToolParam> {
        Vec::new()
    }

    async fn invoke(&self, args: &[String]) -> Result<String, ToolError> {
        expect_args(self.name(), 0, args)?;
        Ok(Local::now().format("%Y-%m-%d %H:%M (%A)").to_string())
    }
}
