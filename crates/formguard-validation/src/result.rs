//! The result contract shared by every validator

use serde::Serialize;
use std::fmt;

/// Outcome of a single validator invocation.
///
/// `error_message` is `None` exactly when `is_valid` is `true`. The fields are
/// private so the only way to build a result is through [`ValidationResult::valid`]
/// and [`ValidationResult::invalid`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    error_message: Option<String>,
}

impl ValidationResult {
    /// A passing result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    /// A failing result carrying the message of the rule that failed
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }

    /// Build a result from an optional failure message
    pub fn from_failure(failure: Option<String>) -> Self {
        match failure {
            Some(message) => Self::invalid(message),
            None => Self::valid(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid
    }

    /// The failure message, if the result is invalid
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Consume the result and return the failure message, if any
    pub fn into_error_message(self) -> Option<String> {
        self.error_message
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_message {
            None => write!(f, "valid"),
            Some(message) => write!(f, "invalid: {}", message),
        }
    }
}
