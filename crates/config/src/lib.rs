//! Configuration loading, validation, and management for fitrec.
//!
//! Loads configuration from a TOML file with environment variable
//! overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Agentic loop tunables.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Document-search backend settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Vision-analysis settings.
    #[serde(default)]
    pub vision: VisionConfig,
}

/// Tunables for the agentic retrieval loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Hard cap on search-and-score iterations per request.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// When enabled, appends a self-assessment block to the final output.
    #[serde(default = "default_true")]
    pub reflection_mode: bool,
}

fn default_max_iterations() -> usize {
    3
}
fn default_true() -> bool {
    true
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            reflection_mode: true,
        }
    }
}

/// Search backend selection and connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Backend kind: "fixture" (built-in corpus) or "http".
    #[serde(default = "default_search_backend")]
    pub backend: String,

    /// Base URL of the HTTP search service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Index/collection name to query.
    #[serde(default = "default_search_index")]
    pub index: String,

    /// API key for the HTTP search service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

fn default_search_backend() -> String {
    "fixture".into()
}
fn default_search_index() -> String {
    "fitness-content".into()
}
fn default_search_timeout() -> u64 {
    30
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: default_search_backend(),
            endpoint: None,
            index: default_search_index(),
            api_key: None,
            timeout_secs: default_search_timeout(),
        }
    }
}

/// Vision-analysis collaborator settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Whether image analysis is attempted at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base URL of the OpenAI-compatible endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Vision-capable model name.
    #[serde(default = "default_vision_model")]
    pub model: String,

    /// API key for the vision endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_vision_timeout")]
    pub timeout_secs: u64,
}

fn default_vision_model() -> String {
    "gpt-4o".into()
}
fn default_vision_timeout() -> u64 {
    60
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: None,
            model: default_vision_model(),
            api_key: None,
            timeout_secs: default_vision_timeout(),
        }
    }
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("agent", &self.agent)
            .field("search", &self.search)
            .field("vision", &self.vision)
            .finish()
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("backend", &self.backend)
            .field("endpoint", &self.endpoint)
            .field("index", &self.index)
            .field("api_key", &redact(&self.api_key))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for VisionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionConfig")
            .field("enabled", &self.enabled)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &redact(&self.api_key))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (`~/.fitrec/config.toml`).
    ///
    /// Environment variable overrides (highest priority):
    /// - `FITREC_MAX_ITERATIONS`
    /// - `FITREC_REFLECTION_MODE`
    /// - `FITREC_SEARCH_API_KEY`
    /// - `FITREC_VISION_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".fitrec")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("FITREC_MAX_ITERATIONS") {
            match raw.parse::<usize>() {
                Ok(n) => self.agent.max_iterations = n,
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid FITREC_MAX_ITERATIONS"),
            }
        }
        if let Ok(raw) = std::env::var("FITREC_REFLECTION_MODE") {
            self.agent.reflection_mode = raw.to_lowercase() == "true";
        }
        if self.search.api_key.is_none() {
            self.search.api_key = std::env::var("FITREC_SEARCH_API_KEY").ok();
        }
        if self.vision.api_key.is_none() {
            self.vision.api_key = std::env::var("FITREC_VISION_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be at least 1".into(),
            ));
        }

        if self.search.backend == "http" && self.search.endpoint.is_none() {
            return Err(ConfigError::ValidationError(
                "search.endpoint is required when search.backend = \"http\"".into(),
            ));
        }

        if !matches!(self.search.backend.as_str(), "fixture" | "http") {
            return Err(ConfigError::ValidationError(format!(
                "unknown search.backend '{}' (expected \"fixture\" or \"http\")",
                self.search.backend
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            search: SearchConfig::default(),
            vision: VisionConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.agent.max_iterations, 3);
        assert!(config.agent.reflection_mode);
        assert_eq!(config.search.backend, "fixture");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.agent.max_iterations, config.agent.max_iterations);
        assert_eq!(parsed.search.index, config.search.index);
    }

    #[test]
    fn zero_iterations_rejected() {
        let config = AppConfig {
            agent: AgentConfig {
                max_iterations: 0,
                reflection_mode: true,
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn http_backend_requires_endpoint() {
        let config = AppConfig {
            search: SearchConfig {
                backend: "http".into(),
                ..SearchConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_backend_rejected() {
        let config = AppConfig {
            search: SearchConfig {
                backend: "elastic".into(),
                ..SearchConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().agent.max_iterations, 3);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[agent]\nmax_iterations = 5\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.agent.max_iterations, 5);
        assert!(config.agent.reflection_mode);
        assert_eq!(config.search.backend, "fixture");
    }

    #[test]
    fn debug_redacts_api_keys() {
        let config = AppConfig {
            search: SearchConfig {
                api_key: Some("secret-key".into()),
                ..SearchConfig::default()
            },
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("max_iterations"));
        assert!(toml_str.contains("fixture"));
    }
}
