//! Configuration management for reagent
//!
//! Loads and saves settings from a JSON file under the user's home
//! directory, falling back to defaults when nothing is configured yet.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

pub mod paths;

pub use paths::{config_path, data_dir};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Provider access credentials
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

/// Agent loop defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefaults {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default)]
    pub require_reasoning: bool,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_iterations: default_max_iterations(),
            require_reasoning: false,
        }
    }
}

fn default_model() -> String {
    "anthropic/claude-sonnet-4".to_string()
}

fn default_max_iterations() -> u32 {
    10
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub agent: AgentDefaults,
}

impl Config {
    /// Load from the default location
    pub async fn load() -> Result<Self> {
        Self::load_from(&config_path()).await
    }

    /// Load from a specific location
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("no config at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        debug!("loading config from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save to the default location
    pub async fn save(&self) -> Result<()> {
        self.save_to(&config_path()).await
    }

    /// Save to a specific location
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Resolved API key: the `REAGENT_API_KEY` environment variable
    /// wins over the config file.
    pub fn api_key(&self) -> Option<String> {
        std::env::var("REAGENT_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| {
                if self.provider.api_key.is_empty() {
                    None
                } else {
                    Some(self.provider.api_key.clone())
                }
            })
    }

    pub fn api_base(&self) -> Option<String> {
        self.provider.api_base.clone()
    }

    pub fn model(&self) -> String {
        self.agent.model.clone()
    }

    pub fn max_iterations(&self) -> u32 {
        self.agent.max_iterations
    }

    pub fn require_reasoning(&self) -> bool {
        self.agent.require_reasoning
    }
}
