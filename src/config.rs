use std::time::Duration;

use thiserror::Error;

use crate::constants::{DEFAULT_REDDIT_BASE_URL, DEFAULT_UPSTREAM_TIMEOUT_SECS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web Server
    pub web_host: String,
    pub web_port: u16,

    // Upstream
    pub reddit_base_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8000)?,

            // Upstream
            reddit_base_url: env_or_default("REDDIT_BASE_URL", DEFAULT_REDDIT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            upstream_timeout: Duration::from_secs(parse_env_u64(
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reddit_base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "REDDIT_BASE_URL".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if !self.reddit_base_url.starts_with("http://")
            && !self.reddit_base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                name: "REDDIT_BASE_URL".to_string(),
                message: format!("must be an http(s) URL, got '{}'", self.reddit_base_url),
            });
        }
        if self.upstream_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "UPSTREAM_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Defaults for tests, pointing at the real upstream.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            web_host: "127.0.0.1".to_string(),
            web_port: 0,
            reddit_base_url: DEFAULT_REDDIT_BASE_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}
