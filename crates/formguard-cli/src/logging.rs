//! Log subscriber setup for the CLI

use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration for the `formguard` binary
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level used when no filter is given
    pub level: String,
    /// Emit JSON lines instead of plain text
    pub json_format: bool,
    /// Filter directives replacing `level`, e.g. "formguard::form=trace"
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Verbose output including every validation result
    pub fn debug() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            env_filter: None,
        }
    }

    pub fn with_json(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }

    /// Directives the filter is built from when `RUST_LOG` is unset
    pub fn directives(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(&self.level)
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured filter.
///
/// Logs go to stderr so stdout stays parseable.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config.directives()))?;

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(std::io::stderr).json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(std::io::stderr).with_target(true))
            .try_init()?;
    }

    tracing::debug!(
        target: "formguard::logging",
        "Logging initialized (level: {}, format: {})",
        config.level,
        if config.json_format { "JSON" } else { "text" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let config = LoggingConfig::default();
        assert_eq!(config.directives(), "warn");
        assert!(!config.json_format);

        let config = LoggingConfig::debug().with_json(true);
        assert_eq!(config.directives(), "debug");
        assert!(config.json_format);
    }

    #[test]
    fn test_env_filter_replaces_level() {
        let config = LoggingConfig {
            env_filter: Some("formguard::form=trace".to_string()),
            ..LoggingConfig::debug()
        };
        assert_eq!(config.directives(), "formguard::form=trace");
    }
}
