//! Select (dropdown) validator

use super::is_blank;
use crate::custom::CustomValidation;
use crate::result::ValidationResult;
use crate::rules::{CustomMessages, Rule, RuleChain};
use serde::Deserialize;

/// Rules for [`is_select`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectConfig {
    pub required: bool,
    pub custom_message: CustomMessages,
    #[serde(skip)]
    pub custom_validation: Option<CustomValidation<str>>,
}

impl SelectConfig {
    /// Config with no rules enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject an empty selection
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Override the message reported for `rule`
    pub fn message(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.custom_message.insert(rule, message);
        self
    }

    /// Hook run on the selected value
    pub fn custom_validation(mut self, hook: CustomValidation<str>) -> Self {
        self.custom_validation = Some(hook);
        self
    }
}

/// Validate the selected option.
///
/// Unlike the other validators, a failing hook without a message falls back to
/// the `customValidation` override and then to a built-in message.
pub fn is_select(value: Option<&str>, config: &SelectConfig) -> ValidationResult {
    RuleChain::new(&config.custom_message)
        .check(
            Rule::Required,
            || config.required && is_blank(value),
            || "Please select a valid option.".to_string(),
        )
        .custom_with_fallback(
            config.custom_validation.as_ref(),
            value.unwrap_or(""),
            "The selected option is not allowed.",
        )
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject_with(message: &'static str) -> CustomValidation<str> {
        CustomValidation::new(move |value: &str| {
            if value == "forbidden" {
                ValidationResult::invalid(message)
            } else {
                ValidationResult::valid()
            }
        })
    }

    #[test]
    fn test_required() {
        let config = SelectConfig::new().required(true);
        assert_eq!(
            is_select(Some(""), &config).error_message(),
            Some("Please select a valid option.")
        );
        assert!(is_select(None, &config).is_invalid());
        assert!(is_select(Some("rust"), &config).is_valid());
    }

    #[test]
    fn test_optional_empty_selection_is_valid() {
        assert!(is_select(Some(""), &SelectConfig::new()).is_valid());
    }

    #[test]
    fn test_hook_message_wins() {
        let config = SelectConfig::new()
            .message(Rule::CustomValidation, "configured")
            .custom_validation(reject_with("from hook"));
        assert_eq!(is_select(Some("forbidden"), &config).error_message(), Some("from hook"));
    }

    #[test]
    fn test_configured_message_when_hook_is_silent() {
        let config = SelectConfig::new()
            .message(Rule::CustomValidation, "configured")
            .custom_validation(reject_with(""));
        assert_eq!(is_select(Some("forbidden"), &config).error_message(), Some("configured"));
    }

    #[test]
    fn test_default_message_when_nothing_is_configured() {
        let config = SelectConfig::new().custom_validation(reject_with(""));
        assert_eq!(
            is_select(Some("forbidden"), &config).error_message(),
            Some("The selected option is not allowed.")
        );
        assert!(is_select(Some("allowed"), &config).is_valid());
    }

    #[test]
    fn test_required_checked_before_hook() {
        let config = SelectConfig::new()
            .required(true)
            .custom_validation(CustomValidation::new(|_: &str| {
                ValidationResult::invalid("hook")
            }));
        assert_eq!(
            is_select(Some(""), &config).error_message(),
            Some("Please select a valid option.")
        );
    }
}
