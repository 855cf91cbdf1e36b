//! Tracing setup shared by the Armory binaries.
//!
//! The log filter comes from `RUST_LOG` and falls back to
//! [`TracingConfig::default_directive`] when unset.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is not set.
    pub default_directive: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            default_directive: DEFAULT_DIRECTIVE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to install log bridge: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Installs the global subscriber and bridges `log` records into it.
///
/// Fails if a subscriber or logger is already installed.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };
    installed.map_err(|e| TelemetryError::Subscriber(e.to_string()))?;

    tracing_log::LogTracer::init()?;
    Ok(())
}

fn build_filter(config: &TracingConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.default_directive)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_text_at_info() {
        let config = TracingConfig::default();
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.default_directive, "info");
    }

    #[test]
    fn invalid_directive_is_rejected() {
        let config = TracingConfig {
            format: LogFormat::Text,
            default_directive: "armory=notalevel".to_string(),
        };

        if std::env::var("RUST_LOG").is_err() {
            assert!(matches!(
                build_filter(&config),
                Err(TelemetryError::Filter(_))
            ));
        }
    }
}
