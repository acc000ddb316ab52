//! Configuration loading, validation, and management for FlightDesk.
//!
//! Loads configuration from `~/.flightdesk/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.flightdesk/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Flight-operations backend
    #[serde(default)]
    pub backend: BackendConfig,

    /// Planning oracle
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Planner loop limits
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP front door
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the REST API gateway (no trailing slash needed)
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Per-request timeout. Unset means the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_backend_url() -> String {
    "http://localhost:5000".into()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Name used in logs
    #[serde(default = "default_planner_name")]
    pub name: String,

    /// OpenAI-compatible endpoint (`/chat/completions` is appended)
    #[serde(default = "default_planner_url")]
    pub api_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub temperature: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_planner_name() -> String {
    "openai".into()
}
fn default_planner_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4".into()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            name: default_planner_name(),
            api_url: default_planner_url(),
            api_key: None,
            model: default_model(),
            temperature: 0.0,
            max_tokens: None,
        }
    }
}

impl std::fmt::Debug for PlannerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerConfig")
            .field("name", &self.name)
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Upper bound on planner steps per request
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
}

fn default_max_steps() -> u32 {
    15
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

/// How the front door maps requests to sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// One token for the whole process
    #[default]
    Shared,
    /// One token per `X-Session-Id` header value
    PerClient,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub session_mode: SessionMode,

    /// Origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            session_mode: SessionMode::default(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path with env var overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides()?;
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

    /// Apply environment overrides on top of file values.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("APIGATEWAY_API_URL") {
            self.backend.base_url = url;
        }

        if let Some(key) = lookup("FLIGHTDESK_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            self.planner.api_key = Some(key);
        }

        if let Some(url) = lookup("FLIGHTDESK_PLANNER_URL") {
            self.planner.api_url = url;
        }

        if let Some(model) = lookup("FLIGHTDESK_MODEL") {
            self.planner.model = model;
        }

        if let Some(steps) = lookup("FLIGHTDESK_MAX_STEPS") {
            self.agent.max_steps = steps.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "FLIGHTDESK_MAX_STEPS must be a positive integer, got `{steps}`"
                ))
            })?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".flightdesk")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.max_steps == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_steps must be at least 1".into(),
            ));
        }

        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(format!(
                "backend.base_url must start with http:// or https://, got `{}`",
                self.backend.base_url
            )));
        }

        if self.planner.temperature < 0.0 || self.planner.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "planner.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        Ok(())
    }

    /// Check if a planner API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.planner.api_key.is_some()
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
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
