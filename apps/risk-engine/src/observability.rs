//! Logging initialization for processes hosting the risk engine.
//!
//! The library itself only emits `tracing` events; a hosting process calls
//! [`init_logging`] once at startup to install a subscriber.
//!
//! # Example
//!
//! ```ignore
//! use risk_engine::observability::{LoggingConfig, init_logging};
//!
//! init_logging(&LoggingConfig::default()).expect("failed to initialize logging");
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Configuration for log output.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Emit compact single-line output instead of the full fmt layer.
    pub compact: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            compact: false,
        }
    }
}

impl LoggingConfig {
    /// Set the fallback filter directive.
    #[must_use]
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    /// Use compact single-line output.
    #[must_use]
    pub const fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

/// Error type for logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// A subscriber is already installed for this process.
    #[error("failed to initialize logging subscriber: {0}")]
    SubscriberError(String),
}

/// Install the global tracing subscriber: `RUST_LOG`-driven `EnvFilter` with
/// the configured fallback, plus a fmt layer.
///
/// # Errors
///
/// Returns [`LoggingError::SubscriberError`] if a global subscriber is
/// already set (e.g. calling this twice).
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter.clone()));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.compact {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| LoggingError::SubscriberError(e.to_string()))?;

    tracing::info!(filter = %config.default_filter, "logging initialized");
    Ok(())
}
