//! Application configuration
//!
//! Loaded from environment variables, with an optional `.env` file.

use std::env;

use reqwest::Url;

/// Runtime configuration for the lookup client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base address of the achievements backend.
    pub api_base_url: Url,
    /// Username the search input starts with.
    pub default_username: String,
    /// Edge length in pixels of the rendered avatar.
    pub avatar_size: u32,
    pub log_format: LogFormat,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_USERNAME: &str = "torvalds";
pub const DEFAULT_AVATAR_SIZE: u32 = 100;

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unusable value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = parse_base_url(
            lookup("COLAB_API_BASE_URL")
                .as_deref()
                .unwrap_or(DEFAULT_API_BASE_URL),
        )?;

        let default_username =
            lookup("COLAB_DEFAULT_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        let avatar_size = match lookup("COLAB_AVATAR_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidValue("COLAB_AVATAR_SIZE", raw))?,
            None => DEFAULT_AVATAR_SIZE,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => match raw.to_lowercase().as_str() {
                "pretty" | "" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::InvalidValue("LOG_FORMAT", raw)),
            },
            None => LogFormat::default(),
        };

        Ok(Self {
            api_base_url,
            default_username,
            avatar_size,
            log_format,
        })
    }
}

/// Parse and validate the backend base address.
///
/// The URL must be absolute http(s) and able to carry path segments.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidValue("COLAB_API_BASE_URL", format!("{raw} ({e})")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue(
            "COLAB_API_BASE_URL",
            raw.to_string(),
        ));
    }

    Ok(url)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
