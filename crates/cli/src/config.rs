//! Configuration loading and management

use anyhow::{Context, Result};
use sentimind_adapters::rest::DEFAULT_BASE_URL;
use sentimind_domain::usecases::compose::DEFAULT_MAX_CHARS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Which service implementation to use: "rest" or "memory"
    #[serde(default = "default_backend")]
    pub backend: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Soft limit shown by the composer counter
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    #[serde(default = "default_true")]
    pub relative_time: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_tui_log_file")]
    pub log_file: PathBuf,

    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_backend() -> String {
    "rest".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_true() -> bool {
    true
}

pub(crate) fn default_tui_log_file() -> PathBuf {
    PathBuf::from("./sentimind-tui.log")
}

fn default_tick_millis() -> u64 {
    100
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            base_url: default_base_url(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            relative_time: default_true(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            log_file: default_tui_log_file(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("SENTIMIND")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# sentimind configuration

[general]
log_level = "info"

[api]
backend = "rest"  # rest, memory
base_url = "http://127.0.0.1:8000/api"

[feed]
# Soft limit: longer posts are flagged, not truncated
max_chars = 1000
relative_time = true

[tui]
log_file = "./sentimind-tui.log"
tick_millis = 100
"#
        .to_string()
    }
}
