//! Configuration infrastructure
//!
//! Configuration is organized into two tiers:
//! 1. User-configurable settings (the knobs a crawl operator actually turns)
//! 2. Advanced settings (config file only; contract-level values with safe
//!    defaults)
//!
//! Settings load from an optional JSON file; anything missing falls back to
//! the defaults below.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::domain::constants;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-configurable settings
    #[serde(default)]
    pub user: UserConfig,

    /// Advanced settings (config file only)
    #[serde(default)]
    pub advanced: AdvancedConfig,
}

/// User-configurable crawl settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Results per search page; the API caps this at 48.
    pub page_size: u32,

    /// Maximum outbound requests per second.
    pub max_requests_per_second: u32,

    /// Directory the per-record JSON files are written to.
    pub result_dir: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            page_size: constants::MAX_PAGE_SIZE,
            max_requests_per_second: 3,
            result_dir: "results".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Advanced settings that rarely change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedConfig {
    /// Site root; overridable so tests can point at a local server.
    pub base_url: String,

    /// Timeout for HTTP requests in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            base_url: constants::BASE_URL.to_string(),
            request_timeout_seconds: 30,
        }
    }
}

/// Logging configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output (under `logs/` next to the working directory)
    pub file_output: bool,

    /// Module-specific log level filters (e.g. "reqwest": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut module_filters = HashMap::new();
        module_filters.insert("reqwest".to_string(), "warn".to_string());
        module_filters.insert("hyper".to_string(), "warn".to_string());

        Self {
            level: "info".to_string(),
            console_output: true,
            file_output: false,
            module_filters,
        }
    }
}

/// Loads [`AppConfig`] from an optional JSON file.
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Load the configuration, falling back to defaults when no file was
    /// given. A file that was explicitly named but cannot be read or parsed
    /// is an error rather than a silent fallback.
    pub async fn load_config(&self) -> Result<AppConfig> {
        let Some(path) = &self.config_path else {
            info!("No config file given, using default configuration");
            return Ok(AppConfig::default());
        };

        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!(config = %path.display(), "Loaded configuration");
        Ok(config)
    }
}
