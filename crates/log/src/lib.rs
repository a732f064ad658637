//! # Courier Log
//!
//! Installs the process-wide `tracing` subscriber for Courier binaries.
//! Libraries only emit events through `tracing`; this crate decides where
//! they go.
//!
//! ```rust
//! use courier_log::{Config, Format};
//!
//! let config = Config::from_lookup(|key| (key == "COURIER_LOG_FORMAT").then(|| "json".to_owned()));
//! assert_eq!(config.format, Format::Json);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{Config, FORMAT_VAR, Format, LEVEL_VAR};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Error type for logger operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The filter directive could not be parsed
    #[error("invalid log filter `{directive}`: {reason}")]
    Filter {
        /// The rejected directive
        directive: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber was already installed
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Returned by a successful initialization.
#[derive(Debug)]
pub struct LoggerGuard {
    format: Format,
}

impl LoggerGuard {
    /// The format the logger writes.
    pub fn format(&self) -> Format {
        self.format
    }
}

/// Builds the filter for a directive.
pub fn filter(directive: &str) -> Result<EnvFilter, LogError> {
    EnvFilter::try_new(directive).map_err(|e| LogError::Filter {
        directive: directive.to_owned(),
        reason: e.to_string(),
    })
}

/// Initialize from `COURIER_LOG`, `RUST_LOG` and `COURIER_LOG_FORMAT`.
pub fn init() -> Result<LoggerGuard, LogError> {
    init_with(Config::from_env())
}

/// Initialize with custom configuration. Output goes to stderr.
pub fn init_with(config: Config) -> Result<LoggerGuard, LogError> {
    let filter = filter(&config.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        Format::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_ansi(config.colors)
                    .with_target(config.target),
            )
            .try_init(),
        Format::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_ansi(config.colors)
                .with_target(config.target);
            if config.time {
                registry.with(layer).try_init()
            } else {
                registry.with(layer.without_time()).try_init()
            }
        }
        Format::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr)
                    .with_target(config.target),
            )
            .try_init(),
    };

    result.map_err(|e| LogError::AlreadyInitialized(e.to_string()))?;
    tracing::debug!(level = %config.level, format = ?config.format, "logger initialized");

    Ok(LoggerGuard {
        format: config.format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_directive() {
        let err = filter("courier=[").unwrap_err();
        assert!(matches!(err, LogError::Filter { ref directive, .. } if directive == "courier=["));
    }

    #[test]
    fn accepts_target_directives() {
        assert!(filter("info,courier_action=debug,reqwest=warn").is_ok());
    }

    #[test]
    fn init_reports_bad_filter_before_installing() {
        let err = init_with(Config::default().with_level("courier=[")).unwrap_err();
        assert!(err.to_string().contains("invalid log filter"));
    }
}
