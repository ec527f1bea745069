//! Field descriptors: which controls a validator watches, and when

use crate::control::{Control, ControlKind};
use formguard_validation::{FieldConfig, FieldValue, Validator, ValidatorRef};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// The control(s) a field reads its value from
#[derive(Clone)]
pub enum FieldTarget {
    Single(Arc<dyn Control>),
    /// A checkbox or radio collection
    Group(Vec<Arc<dyn Control>>),
}

impl FieldTarget {
    pub fn controls(&self) -> &[Arc<dyn Control>] {
        match self {
            FieldTarget::Single(control) => std::slice::from_ref(control),
            FieldTarget::Group(controls) => controls,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.controls().is_empty()
    }

    pub fn control_ids(&self) -> Vec<String> {
        self.controls()
            .iter()
            .map(|control| control.control_id().to_string())
            .collect()
    }

    /// Read the current value in the shape the validators expect
    pub fn extract_value(&self) -> FieldValue {
        match self {
            FieldTarget::Group(controls) => {
                FieldValue::Group(controls.iter().map(|control| control.checked()).collect())
            }
            FieldTarget::Single(control) => match control.kind() {
                ControlKind::File => FieldValue::File(control.file()),
                kind if kind.is_checkable() => FieldValue::Group(vec![control.checked()]),
                _ => FieldValue::Text(control.value()),
            },
        }
    }
}

impl fmt::Debug for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldTarget::Single(control) => {
                f.debug_tuple("Single").field(&control.control_id()).finish()
            }
            FieldTarget::Group(_) => f.debug_tuple("Group").field(&self.control_ids()).finish(),
        }
    }
}

impl From<Arc<dyn Control>> for FieldTarget {
    fn from(control: Arc<dyn Control>) -> Self {
        FieldTarget::Single(control)
    }
}

impl From<Vec<Arc<dyn Control>>> for FieldTarget {
    fn from(controls: Vec<Arc<dyn Control>>) -> Self {
        FieldTarget::Group(controls)
    }
}

/// When a field validates during live interaction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Trigger {
    /// The validator's default event
    #[default]
    Default,
    On(String),
    /// Only validated by a full-form pass
    SubmitOnly,
}

impl Trigger {
    /// Event to bind for `validator`, if any. A blank event name binds the
    /// validator's default.
    pub fn event_for(&self, validator: &dyn Validator) -> Option<String> {
        match self {
            Trigger::On(event) if !event.trim().is_empty() => Some(event.clone()),
            Trigger::Default | Trigger::On(_) => Some(validator.default_trigger().to_string()),
            Trigger::SubmitOnly => None,
        }
    }
}

/// Binding of one validator and config to one or more controls
#[derive(Debug, Clone, Default)]
pub struct FieldDescriptor {
    pub name: Option<String>,
    pub target: Option<FieldTarget>,
    pub validator: Option<ValidatorRef>,
    pub config: FieldConfig,
    pub trigger: Trigger,
}

impl FieldDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn element(mut self, control: Arc<dyn Control>) -> Self {
        self.target = Some(FieldTarget::Single(control));
        self
    }

    pub fn elements(mut self, controls: Vec<Arc<dyn Control>>) -> Self {
        self.target = Some(FieldTarget::Group(controls));
        self
    }

    pub fn target(mut self, target: FieldTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn validator(mut self, validator: impl Into<ValidatorRef>) -> Self {
        self.validator = Some(validator.into());
        self
    }

    pub fn config(mut self, config: impl Into<FieldConfig>) -> Self {
        self.config = config.into();
        self
    }

    /// Validate live on `event` instead of the default event
    pub fn on(mut self, event: impl Into<String>) -> Self {
        self.trigger = Trigger::On(event.into());
        self
    }

    pub fn submit_only(mut self) -> Self {
        self.trigger = Trigger::SubmitOnly;
        self
    }

    /// The explicit name, else the id of the first control
    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| {
                self.target
                    .as_ref()
                    .and_then(|target| target.controls().first())
                    .map(|control| control.control_id().to_string())
            })
            .unwrap_or_default()
    }
}

/// A field that failed during a full-form pass
#[derive(Debug, Clone)]
pub struct InvalidField {
    pub field: FieldDescriptor,
    pub error_message: String,
}

impl InvalidField {
    pub fn report(&self) -> InvalidFieldReport {
        InvalidFieldReport {
            field: self.field.label(),
            controls: self
                .field
                .target
                .as_ref()
                .map(FieldTarget::control_ids)
                .unwrap_or_default(),
            error_message: self.error_message.clone(),
        }
    }
}

/// Serializable summary of an [`InvalidField`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidFieldReport {
    pub field: String,
    pub controls: Vec<String>,
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryControl;
    use formguard_validation::{FileInfo, ValidatorKind, ValidatorRegistry};

    #[test]
    fn test_text_value() {
        let input = MemoryControl::text("name").with_value("Ada");
        let target = FieldTarget::Single(input.as_control());
        assert_eq!(target.extract_value(), FieldValue::text("Ada"));
    }

    #[test]
    fn test_group_value() {
        let first = MemoryControl::checkbox("a");
        let second = MemoryControl::checkbox("b").with_checked(true);
        let target = FieldTarget::Group(vec![first.as_control(), second.as_control()]);
        assert_eq!(target.extract_value(), FieldValue::Group(vec![false, true]));
        assert_eq!(target.control_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_single_checkable_and_file_values() {
        let terms = MemoryControl::checkbox("terms").with_checked(true);
        assert_eq!(
            FieldTarget::Single(terms.as_control()).extract_value(),
            FieldValue::Group(vec![true])
        );

        let upload =
            MemoryControl::file("cv").with_file(FileInfo::new("cv.pdf", "application/pdf", 5));
        assert!(matches!(
            FieldTarget::Single(upload.as_control()).extract_value(),
            FieldValue::File(Some(_))
        ));
    }

    #[test]
    fn test_trigger_events() {
        let registry = ValidatorRegistry::with_defaults();
        let validator = registry.get(ValidatorKind::String.key()).unwrap();
        assert_eq!(Trigger::Default.event_for(validator.as_ref()), Some("blur".to_string()));
        assert_eq!(
            Trigger::On("input".into()).event_for(validator.as_ref()),
            Some("input".to_string())
        );
        assert_eq!(Trigger::SubmitOnly.event_for(validator.as_ref()), None);
    }

    #[test]
    fn test_blank_trigger_binds_default_event() {
        let registry = ValidatorRegistry::with_defaults();
        let validator = registry.get(ValidatorKind::Radio.key()).unwrap();
        assert_eq!(
            Trigger::On(String::new()).event_for(validator.as_ref()),
            Some(validator.default_trigger().to_string())
        );
        assert_eq!(
            Trigger::On("  ".into()).event_for(validator.as_ref()),
            Some(validator.default_trigger().to_string())
        );
    }

    #[test]
    fn test_label_falls_back_to_control_id() {
        let input = MemoryControl::text("email");
        let field = FieldDescriptor::new().element(input.as_control());
        assert_eq!(field.label(), "email");
        assert_eq!(field.named("Work email").label(), "Work email");
    }
}
