//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Prompts domain configuration.
    pub prompts: PromptsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the prompts domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Directory holding the prompt definition files.
    pub directory: PathBuf,

    /// Whether to watch the directory and reload on change.
    pub watch: bool,

    /// How often the watcher polls the directory, in milliseconds.
    pub poll_interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl PromptsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("prompts"),
            watch: true,
            poll_interval_ms: 1000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-prompt-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            prompts: PromptsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_PROMPTS_DIR`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(dir) = std::env::var("MCP_PROMPTS_DIR") {
            config.prompts.directory = PathBuf::from(dir);
        } else if let Ok(cwd) = std::env::current_dir() {
            config.prompts.directory = cwd.join("prompts");
        }

        if let Ok(watch) = std::env::var("MCP_PROMPTS_WATCH") {
            config.prompts.watch = !matches!(watch.to_lowercase().as_str(), "false" | "0" | "no");
        }

        if let Ok(interval) = std::env::var("MCP_PROMPTS_POLL_MS") {
            match interval.parse() {
                Ok(ms) => config.prompts.poll_interval_ms = ms,
                Err(_) => warn!(
                    "Ignoring invalid MCP_PROMPTS_POLL_MS '{}', using {}ms",
                    interval, config.prompts.poll_interval_ms
                ),
            }
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}
