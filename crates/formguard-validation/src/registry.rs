//! Type-erased validators and the name → validator registry
//!
//! The orchestration layer never calls the family functions directly. It
//! resolves a [`ValidatorRef`] against a [`ValidatorRegistry`] and talks to the
//! resulting [`Validator`] through [`FieldValue`] and [`FieldConfig`].

use crate::error::{ConfigError, ConfigResult};
use crate::result::ValidationResult;
use crate::validators::*;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Event a validator listens to when a field does not name one
pub const DEFAULT_TRIGGER: &str = "blur";

/// The value read from a field's control(s)
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text of an input, textarea or select
    Text(Option<String>),
    /// Selected file of a file input
    File(Option<FileInfo>),
    /// Checked state of each control in a group
    Group(Vec<bool>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Some(value.into()))
    }

    /// Text content; `None` for missing text and for non-text values
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => text.as_deref(),
            _ => None,
        }
    }

    /// Selected file; `None` for missing files and for non-file values
    pub fn as_file(&self) -> Option<&FileInfo> {
        match self {
            Self::File(file) => file.as_ref(),
            _ => None,
        }
    }

    /// Checked states; empty for non-group values
    pub fn checked(&self) -> &[bool] {
        match self {
            Self::Group(checked) => checked,
            _ => &[],
        }
    }
}

/// Configuration attached to a field, one variant per validator family
#[derive(Debug, Clone, Default)]
pub enum FieldConfig {
    /// Family defaults
    #[default]
    Empty,
    String(StringConfig),
    Number(NumberConfig),
    Email(EmailConfig),
    Select(SelectConfig),
    Checkbox(CheckboxConfig),
    Radio(RadioConfig),
    File(FileConfig),
    /// Raw settings for caller-registered validators
    Custom(Value),
}

impl FieldConfig {
    /// Short family name, used in error messages
    pub fn family(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Email(_) => "email",
            Self::Select(_) => "select",
            Self::Checkbox(_) => "checkbox",
            Self::Radio(_) => "radio",
            Self::File(_) => "file",
            Self::Custom(_) => "custom",
        }
    }
}

macro_rules! impl_from_config {
    ($($config:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$config> for FieldConfig {
                fn from(config: $config) -> Self {
                    Self::$variant(config)
                }
            }
        )*
    };
}

impl_from_config! {
    StringConfig => String,
    NumberConfig => Number,
    EmailConfig => Email,
    SelectConfig => Select,
    CheckboxConfig => Checkbox,
    RadioConfig => Radio,
    FileConfig => File,
}

/// A validator usable by the orchestration layer
pub trait Validator: Send + Sync {
    /// Registry key of the validator
    fn name(&self) -> &str;

    /// Validate a value. Must not panic on values or configs of another family.
    fn validate(&self, value: &FieldValue, config: &FieldConfig) -> ValidationResult;

    /// Whether `config` is meant for this validator
    fn accepts(&self, _config: &FieldConfig) -> bool {
        true
    }

    /// Turn raw JSON settings into a config for this validator
    fn parse_config(&self, raw: Value) -> ConfigResult<FieldConfig> {
        Ok(FieldConfig::Custom(raw))
    }

    /// Event used for live validation when a field does not name one
    fn default_trigger(&self) -> &str {
        DEFAULT_TRIGGER
    }
}

/// The built-in validator families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    String,
    Email,
    Number,
    Select,
    Checkbox,
    Radio,
    File,
}

impl ValidatorKind {
    pub const ALL: [ValidatorKind; 7] = [
        ValidatorKind::String,
        ValidatorKind::Email,
        ValidatorKind::Number,
        ValidatorKind::Select,
        ValidatorKind::Checkbox,
        ValidatorKind::Radio,
        ValidatorKind::File,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ValidatorKind::String => "isString",
            ValidatorKind::Email => "isEmail",
            ValidatorKind::Number => "isNumber",
            ValidatorKind::Select => "isSelect",
            ValidatorKind::Checkbox => "isCheckbox",
            ValidatorKind::Radio => "isRadio",
            ValidatorKind::File => "isFile",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Adapter exposing a family function as a [`Validator`]
#[derive(Debug, Clone, Copy)]
pub struct BuiltinValidator {
    kind: ValidatorKind,
}

impl BuiltinValidator {
    pub fn new(kind: ValidatorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ValidatorKind {
        self.kind
    }

    fn parse<T>(&self, raw: Value) -> ConfigResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_value(raw).map_err(|source| ConfigError::InvalidConfig {
            validator: self.kind.key().to_string(),
            source,
        })
    }
}

impl Validator for BuiltinValidator {
    fn name(&self) -> &str {
        self.kind.key()
    }

    fn validate(&self, value: &FieldValue, config: &FieldConfig) -> ValidationResult {
        match (self.kind, config) {
            (ValidatorKind::String, FieldConfig::String(config)) => {
                is_string(value.as_text(), config)
            }
            (ValidatorKind::String, _) => is_string(value.as_text(), &StringConfig::default()),
            (ValidatorKind::Email, FieldConfig::Email(config)) => is_email(value.as_text(), config),
            (ValidatorKind::Email, _) => is_email(value.as_text(), &EmailConfig::default()),
            (ValidatorKind::Number, FieldConfig::Number(config)) => {
                is_number(value.as_text(), config)
            }
            (ValidatorKind::Number, _) => is_number(value.as_text(), &NumberConfig::default()),
            (ValidatorKind::Select, FieldConfig::Select(config)) => {
                is_select(value.as_text(), config)
            }
            (ValidatorKind::Select, _) => is_select(value.as_text(), &SelectConfig::default()),
            (ValidatorKind::Checkbox, FieldConfig::Checkbox(config)) => {
                is_checkbox_group(value.checked(), config)
            }
            (ValidatorKind::Checkbox, _) => {
                is_checkbox_group(value.checked(), &CheckboxConfig::default())
            }
            (ValidatorKind::Radio, FieldConfig::Radio(config)) => {
                is_radio_group(value.checked(), config)
            }
            (ValidatorKind::Radio, _) => is_radio_group(value.checked(), &RadioConfig::default()),
            (ValidatorKind::File, FieldConfig::File(config)) => is_file(value.as_file(), config),
            (ValidatorKind::File, _) => is_file(value.as_file(), &FileConfig::default()),
        }
    }

    fn accepts(&self, config: &FieldConfig) -> bool {
        matches!(
            (self.kind, config),
            (_, FieldConfig::Empty)
                | (ValidatorKind::String, FieldConfig::String(_))
                | (ValidatorKind::Email, FieldConfig::Email(_))
                | (ValidatorKind::Number, FieldConfig::Number(_))
                | (ValidatorKind::Select, FieldConfig::Select(_))
                | (ValidatorKind::Checkbox, FieldConfig::Checkbox(_))
                | (ValidatorKind::Radio, FieldConfig::Radio(_))
                | (ValidatorKind::File, FieldConfig::File(_))
        )
    }

    fn parse_config(&self, raw: Value) -> ConfigResult<FieldConfig> {
        if raw.is_null() {
            return Ok(FieldConfig::Empty);
        }
        Ok(match self.kind {
            ValidatorKind::String => FieldConfig::String(self.parse(raw)?),
            ValidatorKind::Email => FieldConfig::Email(self.parse(raw)?),
            ValidatorKind::Number => FieldConfig::Number(self.parse(raw)?),
            ValidatorKind::Select => FieldConfig::Select(self.parse(raw)?),
            ValidatorKind::Checkbox => FieldConfig::Checkbox(self.parse(raw)?),
            ValidatorKind::Radio => FieldConfig::Radio(self.parse(raw)?),
            ValidatorKind::File => FieldConfig::File(self.parse(raw)?),
        })
    }
}

/// A closure registered as a validator
pub struct FnValidator<F> {
    name: String,
    validate: F,
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&FieldValue, &FieldConfig) -> ValidationResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: &FieldValue, config: &FieldConfig) -> ValidationResult {
        (self.validate)(value, config)
    }
}

/// Wrap a closure as a shareable validator
pub fn validator_fn<F>(name: impl Into<String>, validate: F) -> Arc<dyn Validator>
where
    F: Fn(&FieldValue, &FieldConfig) -> ValidationResult + Send + Sync + 'static,
{
    Arc::new(FnValidator {
        name: name.into(),
        validate,
    })
}

/// How a field names its validator
#[derive(Clone)]
pub enum ValidatorRef {
    /// Registry key, e.g. `"isEmail"`
    Named(String),
    /// A validator instance, used as is
    Direct(Arc<dyn Validator>),
}

impl ValidatorRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl fmt::Debug for ValidatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Direct(validator) => f.debug_tuple("Direct").field(&validator.name()).finish(),
        }
    }
}

impl From<&str> for ValidatorRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for ValidatorRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<ValidatorKind> for ValidatorRef {
    fn from(kind: ValidatorKind) -> Self {
        Self::Named(kind.key().to_string())
    }
}

impl From<Arc<dyn Validator>> for ValidatorRef {
    fn from(validator: Arc<dyn Validator>) -> Self {
        Self::Direct(validator)
    }
}

/// Name → validator mapping
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<dyn Validator>>,
}

impl ValidatorRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in validator under its canonical key
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in ValidatorKind::ALL {
            registry.register(kind.key(), Arc::new(BuiltinValidator::new(kind)));
        }
        registry
    }

    /// Register a validator; an existing entry with the same name is replaced
    pub fn register(&mut self, name: impl Into<String>, validator: Arc<dyn Validator>) {
        let name = name.into();
        if self.validators.insert(name.clone(), validator).is_some() {
            tracing::debug!(target: "formguard::registry", "Replaced validator: {}", name);
        } else {
            tracing::trace!(target: "formguard::registry", "Registered validator: {}", name);
        }
    }

    /// Merge another registry into this one; its entries win
    pub fn extend(&mut self, other: ValidatorRegistry) {
        for (name, validator) in other.validators {
            self.register(name, validator);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.validators.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.validators.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Resolve a field's validator reference
    pub fn resolve(&self, reference: &ValidatorRef) -> ConfigResult<Arc<dyn Validator>> {
        match reference {
            ValidatorRef::Direct(validator) => Ok(Arc::clone(validator)),
            ValidatorRef::Named(name) => self
                .get(name)
                .ok_or_else(|| ConfigError::not_registered(name.clone(), self.names())),
        }
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.names())
            .finish()
    }
}
