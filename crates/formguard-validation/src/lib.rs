//! # formguard-validation
//!
//! Pure validators for form controls. Each family function checks its rules in
//! a fixed order and reports the first failure as a [`ValidationResult`].
//! Messages can be overridden per rule, a custom hook runs after the built-in
//! rules, and a [`ValidatorRegistry`] exposes the families by name.

pub mod custom;
pub mod error;
pub mod registry;
pub mod reporter;
pub mod result;
pub mod rules;
pub mod validators;

// Re-exports for easy access
pub use custom::CustomValidation;
pub use error::{ConfigError, ConfigResult};
pub use registry::{
    validator_fn, BuiltinValidator, FieldConfig, FieldValue, FnValidator, Validator,
    ValidatorKind, ValidatorRef, ValidatorRegistry, DEFAULT_TRIGGER,
};
pub use reporter::{Reporter, ResultCallback};
pub use result::ValidationResult;
pub use rules::{CustomMessages, Rule};

// Built-in validators
pub use validators::{
    is_checkbox_group, is_email, is_file, is_number, is_radio_group, is_select, is_string,
    parse_numeric, CheckboxConfig, EmailConfig, EmailKind, FileConfig, FileInfo, NumberConfig,
    RadioConfig, SelectConfig, StringConfig,
};
