//! Email address validator

use super::is_blank;
use crate::custom::CustomValidation;
use crate::result::ValidationResult;
use crate::rules::{CustomMessages, Rule, RuleChain};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Free mail providers rejected by corporate validation
pub const GENERIC_PROVIDERS: &[&str] = &["gmail.com", "yahoo.com", "outlook.com"];

static EMAIL_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static CORPORATE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}$")
        .expect("corporate email pattern is valid")
});

const CORPORATE_MESSAGE: &str = "The email must be associated with your company domain. Personal email providers such as Gmail, Yahoo, or Outlook are not permitted";

/// Which addresses are acceptable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
    /// Any well-formed address
    #[default]
    Any,
    /// Well-formed addresses outside the generic providers
    Corporate,
}

/// Rules for [`is_email`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailConfig {
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: EmailKind,
    /// Extra domains rejected on top of [`GENERIC_PROVIDERS`]
    pub blocked_domains: Vec<String>,
    pub custom_message: CustomMessages,
    #[serde(skip)]
    pub custom_validation: Option<CustomValidation<str>>,
}

impl EmailConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a corporate-only config
    pub fn corporate() -> Self {
        Self::default().kind(EmailKind::Corporate)
    }

    /// Reject empty or whitespace-only text
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Accept any address or company addresses only
    pub fn kind(mut self, kind: EmailKind) -> Self {
        self.kind = kind;
        self
    }

    /// Reject one more domain in corporate mode
    pub fn block_domain(mut self, domain: impl Into<String>) -> Self {
        self.blocked_domains.push(domain.into());
        self
    }

    /// Override the message reported for `rule`
    pub fn message(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.custom_message.insert(rule, message);
        self
    }

    /// Hook run after the format and corporate checks have passed
    pub fn custom_validation(mut self, hook: CustomValidation<str>) -> Self {
        self.custom_validation = Some(hook);
        self
    }

    fn is_blocked(&self, domain: &str) -> bool {
        GENERIC_PROVIDERS
            .iter()
            .copied()
            .chain(self.blocked_domains.iter().map(String::as_str))
            .any(|blocked| blocked.eq_ignore_ascii_case(domain))
    }
}

fn domain_of(email: &str) -> &str {
    email.rsplit_once('@').map_or("", |(_, domain)| domain)
}

/// Validate an email address.
///
/// Rules, in order: `required`, `invalid` (format), `corporate`, then the
/// custom hook. Only an empty address skips the format check; whitespace is
/// malformed. The corporate check applies to every address, empty included.
pub fn is_email(value: Option<&str>, config: &EmailConfig) -> ValidationResult {
    let email = value.unwrap_or("");
    let blank = is_blank(value);

    RuleChain::new(&config.custom_message)
        .check(
            Rule::Required,
            || config.required && blank,
            || "This field is required".to_string(),
        )
        .check(
            Rule::Invalid,
            || !email.is_empty() && !EMAIL_FORMAT.is_match(email),
            || "Please enter a valid email address".to_string(),
        )
        .check(
            Rule::Corporate,
            || {
                config.kind == EmailKind::Corporate
                    && (config.is_blocked(domain_of(email)) || !CORPORATE_FORMAT.is_match(email))
            },
            || CORPORATE_MESSAGE.to_string(),
        )
        .custom(config.custom_validation.as_ref(), email)
        .finish()
}
