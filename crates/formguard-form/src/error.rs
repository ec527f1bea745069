//! Errors raised while building forms

use formguard_validation::ConfigError;
use thiserror::Error;

pub type FormResult<T> = Result<T, FormError>;

/// Setup-time form errors. A form that fails to build leaves nothing bound.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("A form element is required.")]
    MissingRoot,

    #[error("Each field must have an element.")]
    MissingElement { field: usize },

    #[error("A validation function is required.")]
    MissingValidator { field: usize },

    #[error("validationFunction must be a function or a string key.")]
    InvalidValidatorRef { field: usize },

    #[error("No element matches selector '{0}'")]
    UnresolvedSelector(String),

    #[error("Invalid value for '{selector}': {reason}")]
    InvalidValue { selector: String, reason: String },

    #[error("Schema parse error: {0}")]
    SchemaJson(#[from] serde_json::Error),

    #[error("Schema parse error: {0}")]
    SchemaYaml(#[from] serde_yaml::Error),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FormError {
    /// Index of the offending field descriptor, when there is one
    pub fn field_index(&self) -> Option<usize> {
        match self {
            FormError::MissingElement { field }
            | FormError::MissingValidator { field }
            | FormError::InvalidValidatorRef { field } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(FormError::MissingRoot.to_string(), "A form element is required.");
        assert_eq!(
            FormError::MissingElement { field: 2 }.to_string(),
            "Each field must have an element."
        );
        assert_eq!(
            FormError::MissingValidator { field: 0 }.to_string(),
            "A validation function is required."
        );
    }

    #[test]
    fn test_config_errors_pass_through() {
        let error: FormError = ConfigError::not_registered("isPhone", Vec::new()).into();
        assert_eq!(error.to_string(), "Validator \"isPhone\" is not registered.");
        assert_eq!(error.field_index(), None);
        assert_eq!(FormError::MissingValidator { field: 3 }.field_index(), Some(3));
    }
}
