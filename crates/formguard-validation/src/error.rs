//! Configuration errors raised while setting validators up

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Setup-time errors. Failed validations are never reported through this type;
/// they are ordinary [`crate::ValidationResult`] values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validator \"{name}\" is not registered.")]
    NotRegistered {
        name: String,
        available: Vec<String>,
    },

    #[error("Validator \"{validator}\" does not accept a {found} configuration")]
    ConfigMismatch { validator: String, found: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration for \"{validator}\": {source}")]
    InvalidConfig {
        validator: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Create a not-registered error listing the names that are available
    pub fn not_registered(name: impl Into<String>, available: Vec<String>) -> Self {
        Self::NotRegistered {
            name: name.into(),
            available,
        }
    }

    /// Create a config mismatch error
    pub fn config_mismatch(validator: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ConfigMismatch {
            validator: validator.into(),
            found: found.into(),
        }
    }

    /// Check if the error comes from an unknown validator name
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered { .. })
    }
}
