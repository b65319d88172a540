//! Configuration loading, validation, and management for corechat.
//!
//! Loads configuration from `~/.corechat/config.toml` (or an explicit path)
//! with environment variable overrides. A missing file is not an error:
//! built-in defaults apply. Validates all settings at startup.

use corechat_core::prompt::DEFAULT_HISTORY_WINDOW;
use corechat_core::runtime::DEFAULT_QUALIFIER;
use corechat_core::session::MIN_SESSION_ID_LEN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.corechat/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Agent runtime resource identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_arn: Option<String>,

    /// Memory resource identifier (optional; no memory when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_arn: Option<String>,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Direct-to-model chat settings
    #[serde(default)]
    pub direct: DirectChatConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("agent_arn", &self.agent_arn)
            .field("memory_arn", &self.memory_arn)
            .field("models", &self.models)
            .field("aws", &self.aws)
            .field("memory", &self.memory)
            .field("session", &self.session)
            .field("runtime", &self.runtime)
            .field("direct", &self.direct)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_available_models")]
    pub available: Vec<String>,

    #[serde(default = "default_model")]
    pub default: String,
}

fn default_available_models() -> Vec<String> {
    vec![
        "claude-sonnet-4".into(),
        "claude-3-5-haiku".into(),
        "gpt-4o".into(),
        "gpt-4o-mini".into(),
    ]
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            available: default_available_models(),
            default: default_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "us-west-2".into()
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
        }
    }
}

/// Which conversation memory to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryBackendKind {
    /// Remote AgentCore Memory (requires `memory_arn`)
    #[default]
    Agentcore,
    /// Process-local, forgotten on exit
    InMemory,
    /// No history replay, no persistence
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default)]
    pub backend: MemoryBackendKind,

    /// Number of turns replayed into each prompt
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_WINDOW
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            backend: MemoryBackendKind::default(),
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_min_id_length")]
    pub min_id_length: usize,
}

fn default_min_id_length() -> usize {
    MIN_SESSION_ID_LEN
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_id_length: default_min_id_length(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_qualifier")]
    pub qualifier: String,
}

fn default_qualifier() -> String {
    DEFAULT_QUALIFIER.into()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            qualifier: default_qualifier(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DirectChatConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Messages kept locally between turns
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_max_history() -> usize {
    10
}
fn default_temperature() -> f32 {
    0.7
}

impl Default for DirectChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            max_history: default_max_history(),
            temperature: default_temperature(),
        }
    }
}

impl std::fmt::Debug for DirectChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectChatConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("max_history", &self.max_history)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.corechat/config.toml).
    ///
    /// Environment variables override file values:
    /// - `CORECHAT_AGENT_ARN` / `AGENT_ARN`
    /// - `CORECHAT_MEMORY_ARN` / `MEMORY_ARN`
    /// - `AWS_REGION`
    /// - `CORECHAT_MODEL`
    /// - `OPENAI_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_dir().join("config.toml"))
    }

    /// Load from `path`, then apply process environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env(|key| std::env::var(key).ok());
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

    /// Apply overrides from an environment lookup (highest priority).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|k| lookup(*k).filter(|v| !v.is_empty()));

        if let Some(arn) = first(&["CORECHAT_AGENT_ARN", "AGENT_ARN"]) {
            self.agent_arn = Some(arn);
        }
        if let Some(arn) = first(&["CORECHAT_MEMORY_ARN", "MEMORY_ARN"]) {
            self.memory_arn = Some(arn);
        }
        if let Some(region) = first(&["AWS_REGION"]) {
            self.aws.region = region;
        }
        if let Some(model) = first(&["CORECHAT_MODEL"]) {
            self.models.default = model;
        }
        if let Some(key) = first(&["OPENAI_API_KEY"]) {
            self.direct.api_key = Some(key);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".corechat")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.min_id_length < MIN_SESSION_ID_LEN {
            return Err(ConfigError::ValidationError(format!(
                "session.min_id_length must be at least {MIN_SESSION_ID_LEN}"
            )));
        }

        if self.direct.temperature < 0.0 || self.direct.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "direct.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.direct.max_history < 2 {
            return Err(ConfigError::ValidationError(
                "direct.max_history must keep at least one exchange (>= 2)".into(),
            ));
        }

        if !self.is_known_model(&self.models.default) {
            tracing::warn!(
                model = %self.models.default,
                "Default model is not listed in models.available"
            );
        }

        Ok(())
    }

    /// Whether `name` is one of the configured models.
    pub fn is_known_model(&self, name: &str) -> bool {
        self.models.available.iter().any(|m| m == name)
    }

    /// The memory backend that will actually be used.
    ///
    /// `agentcore` without a `memory_arn` degrades to no memory.
    pub fn effective_memory_backend(&self) -> MemoryBackendKind {
        match self.memory.backend {
            MemoryBackendKind::Agentcore if self.memory_arn.is_none() => MemoryBackendKind::None,
            other => other,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agent_arn: None,
            memory_arn: None,
            models: ModelsConfig::default(),
            aws: AwsConfig::default(),
            memory: MemoryConfig::default(),
            session: SessionConfig::default(),
            runtime: RuntimeConfig::default(),
            direct: DirectChatConfig::default(),
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
