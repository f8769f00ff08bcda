//! Configuration module for the ReviewRadar watcher.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `REVIEWRADAR_API_TOKEN` | Yes | - | OAuth token for the status endpoint |
//! | `REVIEWRADAR_BOT_TOKEN` | Yes | - | Telegram bot token |
//! | `REVIEWRADAR_CHAT_ID` | Yes | - | Destination chat id |
//! | `REVIEWRADAR_ENDPOINT` | No | production URL | Status endpoint override |
//! | `REVIEWRADAR_TELEGRAM_API` | No | `https://api.telegram.org` | Telegram API base override |
//! | `REVIEWRADAR_POLL_INTERVAL_SECS` | No | 600 | Seconds between poll cycles |
//! | `REVIEWRADAR_NOVELTY` | No | `text` | Duplicate suppression: `text` or `status` |
//!
//! # Example
//!
//! ```no_run
//! use reviewradar_watcher::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("Polling {}", config.endpoint);
//! ```

use std::env;

use thiserror::Error;

use crate::tracker::NoveltyPolicy;

/// Production status endpoint.
const DEFAULT_ENDPOINT: &str = "https://api.reviewradar.dev/v1/submission_statuses";

/// Telegram Bot API base URL.
const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Default seconds between poll cycles.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Immutable watcher configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token presented to the status endpoint.
    pub api_token: String,

    /// Telegram bot token.
    pub bot_token: String,

    /// Chat id the notifications are delivered to.
    pub chat_id: String,

    /// Status endpoint URL.
    pub endpoint: String,

    /// Telegram API base URL.
    pub telegram_api: String,

    /// Seconds between poll cycles.
    pub poll_interval_secs: u64,

    /// Duplicate-suppression policy for status notifications.
    pub novelty: NoveltyPolicy,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - any of the three credentials is not set
    /// - `REVIEWRADAR_POLL_INTERVAL_SECS` is set but is not a positive integer
    /// - `REVIEWRADAR_NOVELTY` is set to anything other than `text` or `status`
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = require("REVIEWRADAR_API_TOKEN")?;
        let bot_token = require("REVIEWRADAR_BOT_TOKEN")?;
        let chat_id = require("REVIEWRADAR_CHAT_ID")?;

        let endpoint =
            env::var("REVIEWRADAR_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let telegram_api = env::var("REVIEWRADAR_TELEGRAM_API")
            .unwrap_or_else(|_| DEFAULT_TELEGRAM_API.to_string());

        // Optional: REVIEWRADAR_POLL_INTERVAL_SECS (default: 600, must be > 0)
        let poll_interval_secs = match env::var("REVIEWRADAR_POLL_INTERVAL_SECS") {
            Ok(val) => {
                let secs = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "REVIEWRADAR_POLL_INTERVAL_SECS".to_string(),
                    message: format!("expected positive integer, got '{val}'"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "REVIEWRADAR_POLL_INTERVAL_SECS".to_string(),
                        message: "poll interval must be at least 1 second".to_string(),
                    });
                }
                secs
            }
            Err(_) => DEFAULT_POLL_INTERVAL_SECS,
        };

        // Optional: REVIEWRADAR_NOVELTY (default: text)
        let novelty = match env::var("REVIEWRADAR_NOVELTY") {
            Ok(val) => match val.as_str() {
                "text" => NoveltyPolicy::Text,
                "status" => NoveltyPolicy::Status,
                other => {
                    return Err(ConfigError::InvalidValue {
                        key: "REVIEWRADAR_NOVELTY".to_string(),
                        message: format!("expected 'text' or 'status', got '{other}'"),
                    });
                }
            },
            Err(_) => NoveltyPolicy::default(),
        };

        Ok(Self {
            api_token,
            bot_token,
            chat_id,
            endpoint,
            telegram_api,
            poll_interval_secs,
            novelty,
        })
    }
}

/// Reads a required environment variable.
fn require(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}
