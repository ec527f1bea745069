//! Caller-supplied validation hooks

use crate::result::ValidationResult;
use std::fmt;
use std::sync::Arc;

/// Extra check run after every built-in rule of a validator passed.
///
/// Cloning is cheap; clones share the same closure.
pub struct CustomValidation<T: ?Sized> {
    name: Option<String>,
    hook: Arc<dyn Fn(&T) -> ValidationResult + Send + Sync>,
}

impl<T: ?Sized> CustomValidation<T> {
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&T) -> ValidationResult + Send + Sync + 'static,
    {
        Self {
            name: None,
            hook: Arc::new(hook),
        }
    }

    /// Attach a name, shown in debug traces
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self, value: &T) -> ValidationResult {
        (self.hook)(value)
    }
}

impl<T: ?Sized> Clone for CustomValidation<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            hook: Arc::clone(&self.hook),
        }
    }
}

impl<T: ?Sized> fmt::Debug for CustomValidation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Helpers for common custom checks
impl CustomValidation<str> {
    /// Accept only one of the listed values
    pub fn one_of(allowed: Vec<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |value: &str| {
            if allowed.iter().any(|candidate| candidate == value) {
                ValidationResult::valid()
            } else {
                ValidationResult::invalid(message.clone())
            }
        })
        .named("one_of")
    }

    /// Reject any of the listed values
    pub fn not_one_of(forbidden: Vec<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |value: &str| {
            if forbidden.iter().any(|candidate| candidate == value) {
                ValidationResult::invalid(message.clone())
            } else {
                ValidationResult::valid()
            }
        })
        .named("not_one_of")
    }

    /// Require the value to end with a suffix
    pub fn ends_with(suffix: impl Into<String>, message: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let message = message.into();
        Self::new(move |value: &str| {
            if value.ends_with(&suffix) {
                ValidationResult::valid()
            } else {
                ValidationResult::invalid(message.clone())
            }
        })
        .named("ends_with")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of() {
        let hook = CustomValidation::one_of(
            vec!["red".to_string(), "green".to_string()],
            "Pick a listed colour",
        );
        assert!(hook.call("red").is_valid());
        assert_eq!(hook.call("blue").error_message(), Some("Pick a listed colour"));
    }

    #[test]
    fn test_not_one_of() {
        let hook = CustomValidation::not_one_of(vec!["admin".to_string()], "Reserved name");
        assert!(hook.call("alice").is_valid());
        assert!(hook.call("admin").is_invalid());
    }

    #[test]
    fn test_clones_share_the_hook() {
        let hook = CustomValidation::ends_with(".org", "Email must end with '.org'.");
        let clone = hook.clone();
        assert_eq!(clone.name(), Some("ends_with"));
        assert!(clone.call("team@example.org").is_valid());
        assert!(hook.call("team@example.com").is_invalid());
    }

    #[test]
    fn test_numeric_hook() {
        let even = CustomValidation::new(|value: &f64| {
            if value % 2.0 == 0.0 {
                ValidationResult::valid()
            } else {
                ValidationResult::invalid("Must be even")
            }
        });
        assert!(even.call(&4.0).is_valid());
        assert!(even.call(&3.0).is_invalid());
    }
}
