//! Validators for groups of checkable controls

use crate::result::ValidationResult;
use crate::rules::{CustomMessages, Rule, RuleChain};
use serde::Deserialize;

/// Rules for [`is_checkbox_group`]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckboxConfig {
    /// Minimum number of checked boxes
    pub min_required: usize,
    pub custom_message: CustomMessages,
}

impl Default for CheckboxConfig {
    fn default() -> Self {
        Self {
            min_required: 1,
            custom_message: CustomMessages::default(),
        }
    }
}

impl CheckboxConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum number of checked boxes
    pub fn min_required(mut self, min_required: usize) -> Self {
        self.min_required = min_required;
        self
    }

    /// Override the message reported for `rule`
    pub fn message(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.custom_message.insert(rule, message);
        self
    }
}

/// Rules for [`is_radio_group`]; exactly one selection is always required
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadioConfig {
    pub custom_message: CustomMessages,
}

impl RadioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the message reported for `rule`
    pub fn message(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.custom_message.insert(rule, message);
        self
    }
}

fn checked_count(checked: &[bool]) -> usize {
    checked.iter().filter(|is_checked| **is_checked).count()
}

/// Require at least `min_required` checked boxes
pub fn is_checkbox_group(checked: &[bool], config: &CheckboxConfig) -> ValidationResult {
    RuleChain::new(&config.custom_message)
        .check(
            Rule::MinRequired,
            || checked_count(checked) < config.min_required,
            || format!("Please select at least {} options.", config.min_required),
        )
        .finish()
}

/// Require a selected radio button
pub fn is_radio_group(checked: &[bool], config: &RadioConfig) -> ValidationResult {
    RuleChain::new(&config.custom_message)
        .check(
            Rule::Required,
            || checked_count(checked) == 0,
            || "Please select an option.".to_string(),
        )
        .finish()
}
