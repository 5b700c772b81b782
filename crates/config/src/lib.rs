//! Configuration loading, validation, and management for jobscout.
//!
//! Loads configuration from `~/.jobscout/config.toml` with environment
//! variable overrides, after loading a `.env` file if one is present.
//! Secrets (API keys, mail credentials) live here and in the adapters;
//! the core never sees them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.jobscout/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the language-model backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature (0.0 = deterministic decoding)
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per completion
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Maximum reason-act-observe iterations per request
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Job-search capability configuration
    #[serde(default)]
    pub job_search: JobSearchConfig,

    /// Email capability configuration
    #[serde(default)]
    pub email: EmailConfig,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.0
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_max_iterations() -> usize {
    8
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
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("max_iterations", &self.max_iterations)
            .field("job_search", &self.job_search)
            .field("email", &self.email)
            .finish()
    }
}

/// Configuration for the SerpApi-backed job-search capability.
#[derive(Clone, Serialize, Deserialize)]
pub struct JobSearchConfig {
    /// SerpApi key (`SERPAPI_API_KEY` env var)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serpapi_api_key: Option<String>,

    /// Search endpoint (overridable for tests)
    #[serde(default = "default_search_url")]
    pub search_url: String,
}

fn default_search_url() -> String {
    "https://serpapi.com/search.json".into()
}

impl std::fmt::Debug for JobSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobSearchConfig")
            .field("serpapi_api_key", &redact(&self.serpapi_api_key))
            .field("search_url", &self.search_url)
            .finish()
    }
}

impl Default for JobSearchConfig {
    fn default() -> Self {
        Self {
            serpapi_api_key: None,
            search_url: default_search_url(),
        }
    }
}

/// Configuration for the SMTP email capability.
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Sender address (`EMAIL_ADDRESS` env var)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_address: Option<String>,

    /// Sender password or app password (`EMAIL_PASSWORD` env var)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_password: Option<String>,

    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

fn default_smtp_server() -> String {
    "smtp.gmail.com".into()
}
fn default_smtp_port() -> u16 {
    587
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("sender_address", &self.sender_address)
            .field("sender_password", &redact(&self.sender_password))
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender_address: None,
            sender_password: None,
            smtp_server: default_smtp_server(),
            smtp_port: default_smtp_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.jobscout/config.toml).
    ///
    /// A `.env` file in the working directory is loaded first (missing
    /// files are fine), then environment variables override the file:
    /// - `JOBSCOUT_API_KEY` / `OPENAI_API_KEY` — model backend key
    /// - `JOBSCOUT_MODEL` — model override
    /// - `SERPAPI_API_KEY` — job-search key
    /// - `EMAIL_ADDRESS`, `EMAIL_PASSWORD` — mail credentials
    pub fn load() -> Result<Self, ConfigError> {
        // Secrets may live in a local .env, as the classic setup expects.
        let _ = dotenvy::dotenv();

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

        Ok(config)
    }

    /// Apply environment variable overrides (highest priority).
    pub fn apply_env_overrides(&mut self) {
        if self.api_key.is_none() {
            self.api_key = std::env::var("JOBSCOUT_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("JOBSCOUT_MODEL") {
            self.default_model = model;
        }

        if self.job_search.serpapi_api_key.is_none() {
            self.job_search.serpapi_api_key = std::env::var("SERPAPI_API_KEY").ok();
        }

        if self.email.sender_address.is_none() {
            self.email.sender_address = std::env::var("EMAIL_ADDRESS").ok();
        }
        if self.email.sender_password.is_none() {
            self.email.sender_password = std::env::var("EMAIL_PASSWORD").ok();
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".jobscout")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations < 1 {
            return Err(ConfigError::ValidationError(
                "max_iterations must be at least 1".into(),
            ));
        }

        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        Ok(())
    }

    /// Check if a model API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            max_iterations: default_max_iterations(),
            job_search: JobSearchConfig::default(),
            email: EmailConfig::default(),
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
        assert!(config.validate().is_ok());
        assert_eq!(config.default_model, "gpt-4o-mini");
        assert_eq!(config.max_iterations, 8);
        assert!((config.default_temperature - 0.0).abs() < f32::EPSILON);
        assert_eq!(config.email.smtp_server, "smtp.gmail.com");
        assert_eq!(config.email.smtp_port, 587);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_model, config.default_model);
        assert_eq!(parsed.max_iterations, config.max_iterations);
    }

    #[test]
    fn zero_max_iterations_rejected() {
        let config = AppConfig {
            max_iterations: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            default_temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().api_url, "https://api.openai.com/v1");
    }

    #[test]
    fn config_file_parsing() {
        let toml_str = r#"
default_model = "gpt-4o"
max_iterations = 3

[job_search]
search_url = "http://localhost:9999/search.json"

[email]
smtp_server = "smtp.example.com"
smtp_port = 2525
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_model, "gpt-4o");
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.job_search.search_url, "http://localhost:9999/search.json");
        assert_eq!(config.email.smtp_port, 2525);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = AppConfig {
            api_key: Some("sk-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
