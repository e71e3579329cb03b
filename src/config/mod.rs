//! Client configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `RECIPE_FINDER_*` environment variables.

use crate::error::{ErrorCode, FinderError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const ENV_API_URL: &str = "RECIPE_FINDER_API_URL";
pub const ENV_LANGUAGE: &str = "RECIPE_FINDER_LANGUAGE";
pub const ENV_TIMEOUT_SECS: &str = "RECIPE_FINDER_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "RECIPE_FINDER_LOG_LEVEL";

/// Source of environment variables, so tests do not touch the process env
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the real process environment
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Base URL of the generative backend
    pub api_url: String,
    /// Language code sent with every request
    pub language: String,
    /// Upper bound on how long a single request may stay in flight
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            language: "en".to_string(),
            request_timeout: Duration::from_secs(120),
            log_level: "info".to_string(),
        }
    }
}

impl FinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML file, then apply environment overrides and validate
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FinderError::config_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                format!("Configuration file not found: {}", path.display()),
            ));
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))
            .map_err(|e| {
                FinderError::config_with_code(ErrorCode::CONFIG_READ_FAILED, format!("{e:#}"))
                    .with_source(e)
            })?;

        let mut config = Self::from_toml_str(&content)?;
        config.merge_env_vars(&SystemEnv)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.merge_env_vars(&SystemEnv)?;
        config.validate()?;
        Ok(config)
    }

    pub fn merge_env_vars(&mut self, env: &impl EnvSource) -> Result<()> {
        if let Some(api_url) = env.var(ENV_API_URL) {
            self.api_url = api_url;
        }

        if let Some(language) = env.var(ENV_LANGUAGE) {
            self.language = language;
        }

        if let Some(secs) = env.var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                FinderError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{secs}'"),
                )
            })?;
            self.request_timeout = Duration::from_secs(secs);
        }

        if let Some(level) = env.var(ENV_LOG_LEVEL) {
            self.log_level = level;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(FinderError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "language must not be empty",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(FinderError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "request_timeout must be greater than zero",
            ));
        }
        self.base_url()?;
        Ok(())
    }

    /// The backend URL with a trailing slash, ready for `Url::join`
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.api_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }
}
