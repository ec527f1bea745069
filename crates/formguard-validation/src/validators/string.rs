//! Free-text validator

use super::{is_blank, pattern_serde};
use crate::custom::CustomValidation;
use crate::error::{ConfigError, ConfigResult};
use crate::result::ValidationResult;
use crate::rules::{CustomMessages, Rule, RuleChain};
use regex::Regex;
use serde::Deserialize;

/// Rules for [`is_string`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StringConfig {
    /// Reject missing or whitespace-only values
    pub required: bool,
    /// Minimum length in characters (zero disables the check)
    pub min_length: Option<usize>,
    /// Maximum length in characters (zero disables the check)
    pub max_length: Option<usize>,
    /// Pattern that must match somewhere in the value
    #[serde(with = "pattern_serde")]
    pub pattern: Option<Regex>,
    pub custom_message: CustomMessages,
    #[serde(skip)]
    pub custom_validation: Option<CustomValidation<str>>,
}

impl StringConfig {
    /// Config with no rules enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject empty or whitespace-only text
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Minimum length in characters
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Maximum length in characters
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Regex the whole value must match
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Compile and set a pattern
    pub fn try_pattern(self, pattern: &str) -> ConfigResult<Self> {
        let compiled = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.pattern(compiled))
    }

    /// Override the message reported for `rule`
    pub fn message(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.custom_message.insert(rule, message);
        self
    }

    /// Hook run after every built-in rule has passed
    pub fn custom_validation(mut self, hook: CustomValidation<str>) -> Self {
        self.custom_validation = Some(hook);
        self
    }
}

/// Validate free text.
///
/// Rules, in order: `required`, `minLength`, `maxLength`, `pattern`, then the
/// custom hook, which receives the untrimmed text.
pub fn is_string(value: Option<&str>, config: &StringConfig) -> ValidationResult {
    let text = value.unwrap_or("");
    let length = text.chars().count();
    let min_length = config.min_length.filter(|min| *min > 0);
    let max_length = config.max_length.filter(|max| *max > 0);

    RuleChain::new(&config.custom_message)
        .check(
            Rule::Required,
            || config.required && is_blank(value),
            || "The string cannot be empty.".to_string(),
        )
        .check(
            Rule::MinLength,
            || min_length.is_some_and(|min| length < min),
            || {
                format!(
                    "The string must be at least {} characters long.",
                    min_length.unwrap_or_default()
                )
            },
        )
        .check(
            Rule::MaxLength,
            || max_length.is_some_and(|max| length > max),
            || {
                format!(
                    "The string cannot be longer than {} characters.",
                    max_length.unwrap_or_default()
                )
            },
        )
        .check(
            Rule::Pattern,
            || {
                config
                    .pattern
                    .as_ref()
                    .is_some_and(|pattern| !pattern.is_match(text))
            },
            || "The string format is invalid.".to_string(),
        )
        .custom(config.custom_validation.as_ref(), text)
        .finish()
}
