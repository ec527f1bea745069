//! Rule names, message overrides and the short-circuit rule evaluator
//!
//! Every validator is written as a [`RuleChain`]: a fixed sequence of checks
//! where the first failing rule decides the message and every later rule is
//! skipped.

use crate::custom::CustomValidation;
use crate::result::ValidationResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A named check inside a validator. The key is what `customMessage` maps from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    Invalid,
    Positive,
    Negative,
    Integer,
    Min,
    Max,
    Length,
    Corporate,
    CustomValidation,
    MinRequired,
    Type,
    Size,
}

impl Rule {
    pub fn key(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::MinLength => "minLength",
            Rule::MaxLength => "maxLength",
            Rule::Pattern => "pattern",
            Rule::Invalid => "invalid",
            Rule::Positive => "positive",
            Rule::Negative => "negative",
            Rule::Integer => "integer",
            Rule::Min => "min",
            Rule::Max => "max",
            Rule::Length => "length",
            Rule::Corporate => "corporate",
            Rule::CustomValidation => "customValidation",
            Rule::MinRequired => "minRequired",
            Rule::Type => "type",
            Rule::Size => "size",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-rule message overrides, keyed by [`Rule::key`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomMessages {
    messages: HashMap<String, String>,
}

impl CustomMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override for a rule
    pub fn with(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.insert(rule, message);
        self
    }

    pub fn insert(&mut self, rule: Rule, message: impl Into<String>) {
        self.messages.insert(rule.key().to_string(), message.into());
    }

    /// The override for a rule. Empty overrides count as absent.
    pub fn get(&self, rule: Rule) -> Option<&str> {
        self.messages
            .get(rule.key())
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }

    /// The override for a rule, or the rule's default message
    pub fn resolve(&self, rule: Rule, default: impl FnOnce() -> String) -> String {
        self.get(rule).map(str::to_string).unwrap_or_else(default)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CustomMessages {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(key, message)| (key.into(), message.into()))
                .collect(),
        }
    }
}

/// Ordered, first-failure-wins evaluation of a validator's rules
pub struct RuleChain<'a> {
    messages: &'a CustomMessages,
    failure: Option<String>,
}

impl<'a> RuleChain<'a> {
    pub fn new(messages: &'a CustomMessages) -> Self {
        Self {
            messages,
            failure: None,
        }
    }

    /// Evaluate `fails` unless an earlier rule already failed
    pub fn check<F, M>(mut self, rule: Rule, fails: F, default_message: M) -> Self
    where
        F: FnOnce() -> bool,
        M: FnOnce() -> String,
    {
        if self.failure.is_none() && fails() {
            self.failure = Some(self.messages.resolve(rule, default_message));
        }
        self
    }

    /// Run the caller's hook last. Its own message is used verbatim.
    pub fn custom<T: ?Sized>(mut self, hook: Option<&CustomValidation<T>>, value: &T) -> Self {
        if self.failure.is_some() {
            return self;
        }
        if let Some(hook) = hook {
            self.failure = hook.call(value).into_error_message();
        }
        self
    }

    /// Run the caller's hook last, falling back to the `customValidation`
    /// override and then to `default_message` when the hook's message is empty.
    pub fn custom_with_fallback<T: ?Sized>(
        mut self,
        hook: Option<&CustomValidation<T>>,
        value: &T,
        default_message: &str,
    ) -> Self {
        if self.failure.is_some() {
            return self;
        }
        if let Some(hook) = hook {
            if let Some(message) = hook.call(value).into_error_message() {
                self.failure = Some(if message.is_empty() {
                    self.messages
                        .resolve(Rule::CustomValidation, || default_message.to_string())
                } else {
                    message
                });
            }
        }
        self
    }

    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult::from_failure(self.failure)
    }
}
