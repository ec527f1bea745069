//! Numeric input validator

use super::is_blank;
use crate::custom::CustomValidation;
use crate::result::ValidationResult;
use crate::rules::{CustomMessages, Rule, RuleChain};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("decimal literal pattern is valid")
});

/// Rules for [`is_number`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberConfig {
    pub required: bool,
    /// Value must be greater than zero
    pub positive: bool,
    /// Value must be less than zero
    pub negative: bool,
    /// Value must have no fractional part
    pub integer: bool,
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
    /// Exact number of characters once the decimal point is removed
    pub length: Option<usize>,
    pub custom_message: CustomMessages,
    #[serde(skip)]
    pub custom_validation: Option<CustomValidation<f64>>,
}

impl NumberConfig {
    /// Config with no rules enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject empty or whitespace-only text
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Require a value greater than zero
    pub fn positive(mut self, positive: bool) -> Self {
        self.positive = positive;
        self
    }

    /// Require a value less than zero
    pub fn negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// Reject values with a fractional part
    pub fn integer(mut self, integer: bool) -> Self {
        self.integer = integer;
        self
    }

    /// Inclusive lower bound
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set both bounds
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Exact number of characters, not counting the decimal point
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Override the message reported for `rule`
    pub fn message(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.custom_message.insert(rule, message);
        self
    }

    /// Hook run on the parsed number after every built-in rule has passed
    pub fn custom_validation(mut self, hook: CustomValidation<f64>) -> Self {
        self.custom_validation = Some(hook);
        self
    }
}

/// Convert form text to a number.
///
/// Accepts decimal literals (sign, fraction and exponent optional), `0x`, `0o`
/// and `0b` integer literals, and `Infinity` with an optional sign. Surrounding
/// whitespace is ignored and blank text reads as zero. Anything else is `None`.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(value) = parse_radix_literal(text) {
        return Some(value);
    }

    if DECIMAL_LITERAL.is_match(text) {
        text.parse::<f64>().ok()
    } else {
        None
    }
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let (radix, digits) = match text.get(..2)? {
        "0x" | "0X" => (16, &text[2..]),
        "0o" | "0O" => (8, &text[2..]),
        "0b" | "0B" => (2, &text[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return None;
    }

    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

fn is_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Validate numeric input.
///
/// Rules, in order: `required`, `invalid`, `positive`, `negative`, `integer`,
/// `min`, `max`, `length`, then the custom hook, which receives the parsed
/// number. The emptiness check looks at the raw text; every later rule looks
/// at the parsed value except `length`, which counts the raw text with its
/// decimal point removed.
pub fn is_number(value: Option<&str>, config: &NumberConfig) -> ValidationResult {
    let parsed = value.and_then(parse_numeric);
    let number = parsed.unwrap_or(f64::NAN);

    let chain = RuleChain::new(&config.custom_message)
        .check(
            Rule::Required,
            || config.required && is_blank(value),
            || "The value is required.".to_string(),
        )
        .check(
            Rule::Invalid,
            || parsed.is_none(),
            || "The value must be a valid number.".to_string(),
        )
        .check(
            Rule::Positive,
            || config.positive && number <= 0.0,
            || "The value must be positive.".to_string(),
        )
        .check(
            Rule::Negative,
            || config.negative && number >= 0.0,
            || "The value must be negative.".to_string(),
        )
        .check(
            Rule::Integer,
            || config.integer && !is_integer(number),
            || "The value must be an integer.".to_string(),
        )
        .check(
            Rule::Min,
            || config.min.is_some_and(|min| number < min),
            || {
                format!(
                    "The value must be greater than or equal to {}.",
                    config.min.unwrap_or_default()
                )
            },
        )
        .check(
            Rule::Max,
            || config.max.is_some_and(|max| number > max),
            || {
                format!(
                    "The value must be less than or equal to {}.",
                    config.max.unwrap_or_default()
                )
            },
        )
        .check(
            Rule::Length,
            || {
                config.length.is_some_and(|length| {
                    digit_count(value.unwrap_or_default()) != length
                })
            },
            || {
                format!(
                    "The value must have exactly {} digits.",
                    config.length.unwrap_or_default()
                )
            },
        );

    chain.custom(config.custom_validation.as_ref(), &number).finish()
}

/// Character count with the first decimal point removed
fn digit_count(text: &str) -> usize {
    let count = text.chars().count();
    if text.contains('.') {
        count - 1
    } else {
        count
    }
}
