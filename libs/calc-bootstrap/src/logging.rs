//! Logging initialization.
//!
//! Installs a global `tracing-subscriber` fmt subscriber. The filter comes from
//! `RUST_LOG` when it is set, otherwise from [`LoggingConfig::default_level`].

use tracing_subscriber::{EnvFilter, fmt};

/// Logging configuration for a service process.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set (e.g. `"info"`).
    pub default_level: String,

    /// Emit newline-delimited JSON instead of compact text.
    pub json: bool,

    /// Include the event target (module path) in each line.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_owned(),
            json: false,
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Set the fallback filter directive.
    #[must_use]
    pub fn with_default_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = level.into();
        self
    }

    /// Switch to JSON output.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Include or omit the event target in each line.
    #[must_use]
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }
}

fn build_env_filter(env_value: Option<&str>, cfg: &LoggingConfig) -> EnvFilter {
    env_value
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(&cfg.default_level))
}

/// Install the global subscriber.
///
/// Safe to call more than once: if a subscriber is already installed the call
/// is a no-op.
pub fn init_logging(cfg: &LoggingConfig) {
    let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_env_filter(env_value.as_deref(), cfg);

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(cfg.with_target);

    let result = if cfg.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "global tracing subscriber already installed");
    }
}
