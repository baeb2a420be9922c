//! Diagnostic logging for the lookup client.
//!
//! Events go to stderr; `RUST_LOG` overrides the configured level.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// How the stderr subscriber is set up.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Used only when `RUST_LOG` is unset or unparsable
    pub level: Level,
    /// One JSON object per line, for piping the desktop app's stderr into a collector
    pub json: bool,
    /// Prefix events with their source location; handy when running from a checkout
    pub file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            file_line: true,
        }
    }
}

impl TracingConfig {
    pub fn for_format(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Self::default(),
            LogFormat::Json => Self {
                level: Level::INFO,
                json: true,
                file_line: false,
            },
        }
    }
}

/// Installs the global subscriber.
///
/// Fails with [`TracingError::AlreadyInitialized`] on a second call.
pub fn try_init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    if config.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_file(config.file_line)
            .with_line_number(config.file_line);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|_| TracingError::AlreadyInitialized)
    } else {
        let fmt_layer = fmt::layer()
            .with_file(config.file_line)
            .with_line_number(config.file_line);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|_| TracingError::AlreadyInitialized)
    }
}

/// Subscriber installation errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_config() {
        let config = TracingConfig::for_format(LogFormat::Pretty);
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json);
        assert!(config.file_line);
    }

    #[test]
    fn test_json_config() {
        let config = TracingConfig::for_format(LogFormat::Json);
        assert!(config.json);
        assert!(!config.file_line);
    }

    #[test]
    fn test_second_init_reports_already_initialized() {
        let config = TracingConfig::default();
        let _ = try_init_tracing(&config);
        assert!(matches!(
            try_init_tracing(&config),
            Err(TracingError::AlreadyInitialized)
        ));
    }
}
