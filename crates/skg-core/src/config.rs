//! SKG Configuration Management
//!
//! Handles configuration from environment variables, TOML files,
//! and command-line arguments with documented defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Web search client configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Page fetcher configuration
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Graph rendering configuration
    #[serde(default)]
    pub graph: GraphConfig,

    /// Pipeline orchestration configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Credentials are NOT validated here: an empty key surfaces later as
    /// an authentication failure from the search API.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Search credentials
        if let Ok(key) = std::env::var("SEARCH_API_KEY") {
            config.search.api_key = key;
        }
        if let Ok(id) = std::env::var("SEARCH_ENGINE_ID") {
            config.search.engine_id = id;
        }
        if let Ok(num) = std::env::var("SEARCH_NUM_RESULTS") {
            config.search.num_results = num.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SEARCH_NUM_RESULTS".to_string(),
                value: num,
            })?;
        }

        // Graph
        if let Ok(focus) = std::env::var("SKG_FOCUS_NODE") {
            config.graph.focus_node = focus;
        }

        // Logging
        if let Ok(level) = std::env::var("SKG_LOG") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;

        // Always use env for credentials when present
        if !env_config.search.api_key.is_empty() {
            self.search.api_key = env_config.search.api_key;
        }
        if !env_config.search.engine_id.is_empty() {
            self.search.engine_id = env_config.search.engine_id;
        }
        if env_config.search.num_results != SearchConfig::default().num_results {
            self.search.num_results = env_config.search.num_results;
        }
        if env_config.graph.focus_node != GraphConfig::default().focus_node {
            self.graph.focus_node = env_config.graph.focus_node;
        }
        if env_config.logging.level != LoggingConfig::default().level {
            self.logging.level = env_config.logging.level;
        }

        Ok(self)
    }
}

/// Web search client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search API key (from SEARCH_API_KEY; unvalidated)
    pub api_key: String,

    /// Search engine identifier (from SEARCH_ENGINE_ID; unvalidated)
    pub engine_id: String,

    /// Search API endpoint
    pub endpoint: String,

    /// Number of result URLs to request
    pub num_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            engine_id: String::new(),
            endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
            num_results: 10,
        }
    }
}

/// Page fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with page requests
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "skg/0.1 (+https://github.com/hephaex/skg)".to_string(),
        }
    }
}

/// Graph rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Node whose neighborhood is rendered for every processed page
    pub focus_node: String,

    /// Directory where DOT files are written
    pub output_dir: PathBuf,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            focus_node: "Altera".to_string(),
            output_dir: PathBuf::from("graphs"),
        }
    }
}

/// Pipeline orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Query used when the caller provides an empty one
    pub fallback_query: String,

    /// Default path for the optional text dump
    pub dump_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fallback_query: "use cases of transformers in machine learning".to_string(),
            dump_path: PathBuf::from("output.txt"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
