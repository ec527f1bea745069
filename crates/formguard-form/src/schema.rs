//! Declarative form descriptions loaded from JSON or YAML
//!
//! A schema names controls by selector. [`FormSchema::to_builder`] resolves
//! the selectors through an [`ElementLookup`] and parses each field's `config`
//! with the validator it names.

use crate::control::{Control, EventTarget};
use crate::error::{FormError, FormResult};
use crate::field::{FieldDescriptor, FieldTarget, Trigger};
use crate::form::FormBuilder;
use formguard_validation::{ValidatorRef, ValidatorRegistry};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Resolves selectors to controls and elements
pub trait ElementLookup {
    fn find_control(&self, selector: &str) -> Option<Arc<dyn Control>>;

    fn find_controls(&self, selector: &str) -> Vec<Arc<dyn Control>>;

    fn find_target(&self, selector: &str) -> Option<Arc<dyn EventTarget>>;
}

/// A whole form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    /// Selector of the root element
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default, alias = "submitButtonSelector")]
    pub submit_button: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// One field of a [`FormSchema`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    #[serde(default)]
    pub name: Option<String>,
    /// Selector of a single control
    #[serde(default)]
    pub element: Option<String>,
    /// Selector of a control group
    #[serde(default)]
    pub elements: Option<String>,
    /// Validator key; kept raw so a non-string can be reported
    #[serde(default, alias = "validationFunction")]
    pub validator: Option<Value>,
    #[serde(default)]
    pub config: Option<Value>,
    /// Missing: the validator's default event. `null`: submit only.
    #[serde(default, deserialize_with = "present_option")]
    pub on: Option<Option<String>>,
}

fn present_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl FormSchema {
    pub fn from_json(source: &str) -> FormResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_yaml(source: &str) -> FormResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a schema; `.yaml` and `.yml` files are read as YAML, anything
    /// else as JSON
    pub fn from_file(path: impl AsRef<Path>) -> FormResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|extension| extension.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&source),
            _ => Self::from_json(&source),
        }
    }

    /// Validator keys used by the schema, in field order
    pub fn validator_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter_map(|field| field.validator.as_ref().and_then(Value::as_str))
            .collect()
    }

    /// Resolve every selector and return a builder ready to build.
    ///
    /// `registry` holds the validators beyond the built-in ones; it is used to
    /// parse configs and is handed to the builder.
    pub fn to_builder(
        &self,
        lookup: &dyn ElementLookup,
        registry: &ValidatorRegistry,
    ) -> FormResult<FormBuilder> {
        let mut effective = ValidatorRegistry::with_defaults();
        effective.extend(registry.clone());

        let mut builder = FormBuilder::new().validators(registry.clone());

        if let Some(selector) = &self.element {
            let root = lookup
                .find_target(selector)
                .ok_or_else(|| FormError::UnresolvedSelector(selector.clone()))?;
            builder = builder.element(root);
        }

        if let Some(selector) = &self.submit_button {
            let button = lookup
                .find_target(selector)
                .ok_or_else(|| FormError::UnresolvedSelector(selector.clone()))?;
            builder = builder.submit_button(button);
        }

        for (index, field) in self.fields.iter().enumerate() {
            builder = builder.field(field.to_descriptor(index, lookup, &effective)?);
        }

        Ok(builder)
    }
}

impl FieldSchema {
    /// Build the descriptor for field number `index`
    pub fn to_descriptor(
        &self,
        index: usize,
        lookup: &dyn ElementLookup,
        registry: &ValidatorRegistry,
    ) -> FormResult<FieldDescriptor> {
        let name = match &self.validator {
            None | Some(Value::Null) => return Err(FormError::MissingValidator { field: index }),
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(FormError::InvalidValidatorRef { field: index }),
        };

        let target = self.resolve_target(lookup)?;

        let reference = ValidatorRef::Named(name);
        let validator = registry.resolve(&reference)?;
        let config = validator.parse_config(self.config.clone().unwrap_or(Value::Null))?;

        let trigger = match &self.on {
            None => Trigger::Default,
            Some(None) => Trigger::SubmitOnly,
            Some(Some(event)) if event.trim().is_empty() => Trigger::Default,
            Some(Some(event)) => Trigger::On(event.clone()),
        };

        Ok(FieldDescriptor {
            name: self.name.clone(),
            target,
            validator: Some(reference),
            config,
            trigger,
        })
    }

    fn resolve_target(&self, lookup: &dyn ElementLookup) -> FormResult<Option<FieldTarget>> {
        if let Some(selector) = &self.elements {
            let controls = lookup.find_controls(selector);
            if controls.is_empty() {
                return Err(FormError::UnresolvedSelector(selector.clone()));
            }
            return Ok(Some(FieldTarget::Group(controls)));
        }

        match &self.element {
            Some(selector) => lookup
                .find_control(selector)
                .map(|control| Some(FieldTarget::Single(control)))
                .ok_or_else(|| FormError::UnresolvedSelector(selector.clone())),
            None => Ok(None),
        }
    }
}
