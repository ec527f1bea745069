//! The form orchestrator
//!
//! A [`Form`] resolves every field's validator when it is built, binds live
//! validation to the fields' controls and the submit flow to the root element,
//! and releases all of those bindings on [`Form::destroy`] or drop.

use crate::control::{Control, Event, EventHandler, EventTarget, ListenerId};
use crate::error::{FormError, FormResult};
use crate::field::{FieldDescriptor, FieldTarget, InvalidField};
use crate::presenter::{ControlPresenter, Presenter};
use formguard_validation::{
    ConfigError, Reporter, ValidationResult, Validator, ValidatorRef, ValidatorRegistry,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use uuid::Uuid;

/// Runs before a full-form pass; returning `false` cancels it
pub type SubmitHook = Arc<dyn Fn() -> bool + Send + Sync>;
pub type CompleteHook = Arc<dyn Fn() + Send + Sync>;
pub type ErrorHook = Arc<dyn Fn(&[InvalidField]) + Send + Sync>;

/// Result of a submit attempt
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The pre-validation hook stopped the pass
    Cancelled,
    /// Every field passed
    Completed,
    /// Fields that failed, in declaration order
    Rejected(Vec<InvalidField>),
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SubmitOutcome::Cancelled)
    }

    pub fn invalid_fields(&self) -> &[InvalidField] {
        match self {
            SubmitOutcome::Rejected(fields) => fields,
            _ => &[],
        }
    }
}

struct BoundField {
    descriptor: FieldDescriptor,
    target: FieldTarget,
    validator: Arc<dyn Validator>,
}

struct FormState {
    fields: Vec<BoundField>,
    presenter: Arc<dyn Presenter>,
    reporter: Reporter,
    on_submit: Option<SubmitHook>,
    on_complete: Option<CompleteHook>,
    on_error: Option<ErrorHook>,
}

impl FormState {
    fn validate_field(&self, field: &BoundField) -> ValidationResult {
        let value = field.target.extract_value();
        let result = self.reporter.run(
            field.validator.name(),
            &value,
            &field.descriptor.config,
            |value, config| field.validator.validate(value, config),
        );
        tracing::trace!(
            target: "formguard::form",
            "Field '{}' validated by {}: {}",
            field.descriptor.label(),
            field.validator.name(),
            result
        );
        self.presenter.present(&field.descriptor, &result);
        result
    }

    fn validate_all(&self) -> Vec<InvalidField> {
        self.fields
            .iter()
            .filter_map(|field| {
                self.validate_field(field)
                    .into_error_message()
                    .map(|error_message| InvalidField {
                        field: field.descriptor.clone(),
                        error_message,
                    })
            })
            .collect()
    }

    fn submit(&self) -> SubmitOutcome {
        if let Some(hook) = &self.on_submit {
            if !hook() {
                tracing::info!(target: "formguard::form", "Submit cancelled before validation");
                return SubmitOutcome::Cancelled;
            }
        }

        let invalid = self.validate_all();
        if invalid.is_empty() {
            tracing::info!(
                target: "formguard::form",
                "Form passed validation ({} fields)",
                self.fields.len()
            );
            if let Some(hook) = &self.on_complete {
                hook();
            }
            SubmitOutcome::Completed
        } else {
            tracing::info!(
                target: "formguard::form",
                "Form rejected: {} of {} fields invalid",
                invalid.len(),
                self.fields.len()
            );
            if let Some(hook) = &self.on_error {
                hook(&invalid);
            }
            SubmitOutcome::Rejected(invalid)
        }
    }
}

enum BindingTarget {
    Control(Arc<dyn Control>),
    Element(Arc<dyn EventTarget>),
}

impl BindingTarget {
    fn add_listener(&self, event: &str, handler: EventHandler) -> ListenerId {
        match self {
            BindingTarget::Control(control) => control.add_listener(event, handler),
            BindingTarget::Element(element) => element.add_listener(event, handler),
        }
    }

    fn remove_listener(&self, event: &str, id: ListenerId) -> bool {
        match self {
            BindingTarget::Control(control) => control.remove_listener(event, id),
            BindingTarget::Element(element) => element.remove_listener(event, id),
        }
    }
}

/// One attached listener
struct Binding {
    target: BindingTarget,
    event: String,
    id: ListenerId,
}

impl Binding {
    fn attach(target: BindingTarget, event: &str, handler: EventHandler) -> Self {
        let id = target.add_listener(event, handler);
        Self {
            target,
            event: event.to_string(),
            id,
        }
    }
}

/// Builder for [`Form`]
#[derive(Default)]
pub struct FormBuilder {
    element: Option<Arc<dyn EventTarget>>,
    submit_button: Option<Arc<dyn EventTarget>>,
    fields: Vec<FieldDescriptor>,
    validators: ValidatorRegistry,
    presenter: Option<Arc<dyn Presenter>>,
    reporter: Reporter,
    on_submit: Option<SubmitHook>,
    on_complete: Option<CompleteHook>,
    on_error: Option<ErrorHook>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root element; receives the `submit` binding
    pub fn element(mut self, element: Arc<dyn EventTarget>) -> Self {
        self.element = Some(element);
        self
    }

    /// Button whose `click` also runs the submit flow
    pub fn submit_button(mut self, button: Arc<dyn EventTarget>) -> Self {
        self.submit_button = Some(button);
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = FieldDescriptor>,
    {
        self.fields.extend(fields);
        self
    }

    /// Register or override a validator for this form
    pub fn validator(mut self, name: impl Into<String>, validator: Arc<dyn Validator>) -> Self {
        self.validators.register(name, validator);
        self
    }

    /// Merge a set of validators; later entries win
    pub fn validators(mut self, validators: ValidatorRegistry) -> Self {
        self.validators.extend(validators);
        self
    }

    pub fn presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn on_submit<F>(mut self, hook: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.on_submit = Some(Arc::new(hook));
        self
    }

    pub fn on_complete<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(hook));
        self
    }

    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&[InvalidField]) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Resolve every field and attach the listeners.
    ///
    /// All checks happen before the first listener is attached, so an error
    /// leaves every control untouched.
    pub fn build(self) -> FormResult<Form> {
        let root = self.element.ok_or(FormError::MissingRoot)?;

        let mut registry = ValidatorRegistry::with_defaults();
        registry.extend(self.validators);

        let fields = self
            .fields
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| resolve_field(index, descriptor, &registry))
            .collect::<FormResult<Vec<_>>>()?;

        let state = Arc::new(FormState {
            fields,
            presenter: self.presenter.unwrap_or_else(|| Arc::new(ControlPresenter)),
            reporter: self.reporter,
            on_submit: self.on_submit,
            on_complete: self.on_complete,
            on_error: self.on_error,
        });

        let bindings = bind(&state, root, self.submit_button);
        let form = Form {
            id: Uuid::new_v4(),
            state,
            bindings: Mutex::new(bindings),
        };
        tracing::debug!(
            target: "formguard::form",
            "Form {} built with {} fields and {} listeners",
            form.id,
            form.field_count(),
            form.binding_count()
        );
        Ok(form)
    }
}

fn resolve_field(
    index: usize,
    descriptor: FieldDescriptor,
    registry: &ValidatorRegistry,
) -> FormResult<BoundField> {
    let target = match &descriptor.target {
        Some(target) if !target.is_empty() => target.clone(),
        _ => return Err(FormError::MissingElement { field: index }),
    };

    let reference = match &descriptor.validator {
        Some(ValidatorRef::Named(name)) if name.trim().is_empty() => {
            return Err(FormError::MissingValidator { field: index })
        }
        Some(reference) => reference,
        None => return Err(FormError::MissingValidator { field: index }),
    };

    let validator = registry.resolve(reference)?;
    if !validator.accepts(&descriptor.config) {
        let family = descriptor.config.family();
        return Err(ConfigError::config_mismatch(validator.name(), family).into());
    }

    tracing::debug!(
        target: "formguard::form",
        "Resolved field '{}' to validator {}",
        descriptor.label(),
        validator.name()
    );

    Ok(BoundField {
        descriptor,
        target,
        validator,
    })
}

fn bind(
    state: &Arc<FormState>,
    root: Arc<dyn EventTarget>,
    submit_button: Option<Arc<dyn EventTarget>>,
) -> Vec<Binding> {
    let mut bindings = Vec::new();

    for (index, field) in state.fields.iter().enumerate() {
        let Some(event) = field.descriptor.trigger.event_for(field.validator.as_ref()) else {
            tracing::debug!(
                target: "formguard::form",
                "Field '{}' validates on submit only",
                field.descriptor.label()
            );
            continue;
        };

        for control in field.target.controls() {
            let weak = Arc::downgrade(state);
            let handler: EventHandler = Arc::new(move |_: &Event| {
                if let Some(state) = weak.upgrade() {
                    if let Some(field) = state.fields.get(index) {
                        state.validate_field(field);
                    }
                }
            });
            bindings.push(Binding::attach(
                BindingTarget::Control(Arc::clone(control)),
                &event,
                handler,
            ));
            tracing::debug!(
                target: "formguard::form",
                "Bound '{}' on control '{}'",
                event,
                control.control_id()
            );
        }
    }

    bindings.push(Binding::attach(
        BindingTarget::Element(root),
        "submit",
        submit_handler(Arc::downgrade(state)),
    ));

    if let Some(button) = submit_button {
        bindings.push(Binding::attach(
            BindingTarget::Element(button),
            "click",
            submit_handler(Arc::downgrade(state)),
        ));
    }

    bindings
}

fn submit_handler(state: Weak<FormState>) -> EventHandler {
    Arc::new(move |event: &Event| {
        event.prevent_default();
        if let Some(state) = state.upgrade() {
            state.submit();
        }
    })
}

/// A form bound to its controls. Dropping it releases every binding.
#[must_use = "dropping a Form removes its listeners"]
pub struct Form {
    id: Uuid,
    state: Arc<FormState>,
    bindings: Mutex<Vec<Binding>>,
}

impl Form {
    pub fn builder() -> FormBuilder {
        FormBuilder::new()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn field_count(&self) -> usize {
        self.state.fields.len()
    }

    /// Number of listeners currently attached
    pub fn binding_count(&self) -> usize {
        self.bindings.lock().len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.bindings.lock().is_empty()
    }

    /// Run the submit flow: pre-validation hook, full-form pass, then the
    /// completion or error hook
    pub fn submit(&self) -> SubmitOutcome {
        self.state.submit()
    }

    /// Validate every field without running any hook
    pub fn validate_all(&self) -> Vec<InvalidField> {
        self.state.validate_all()
    }

    /// Validate a single field by declaration index
    pub fn validate_field(&self, index: usize) -> Option<ValidationResult> {
        self.state
            .fields
            .get(index)
            .map(|field| self.state.validate_field(field))
    }

    /// Remove every listener this form attached. Later calls do nothing.
    pub fn destroy(&self) {
        let bindings = std::mem::take(&mut *self.bindings.lock());
        if bindings.is_empty() {
            return;
        }

        let count = bindings.len();
        for binding in bindings {
            if !binding.target.remove_listener(&binding.event, binding.id) {
                tracing::warn!(
                    target: "formguard::form",
                    "Listener {} for '{}' was already detached",
                    binding.id,
                    binding.event
                );
            }
        }
        tracing::debug!(
            target: "formguard::form",
            "Form {} destroyed, {} listeners removed",
            self.id,
            count
        );
    }
}

impl Drop for Form {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("id", &self.id)
            .field("fields", &self.field_count())
            .field("bindings", &self.binding_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryControl, MemoryElement};
    use formguard_validation::{validator_fn, NumberConfig, StringConfig};

    fn root() -> MemoryElement {
        MemoryElement::new("form")
    }

    #[test]
    fn test_missing_root() {
        let error = Form::builder().build().unwrap_err();
        assert!(matches!(error, FormError::MissingRoot));
    }

    #[test]
    fn test_missing_element() {
        let error = Form::builder()
            .element(root().as_target())
            .field(FieldDescriptor::new().validator("isString"))
            .build()
            .unwrap_err();
        assert_eq!(error.to_string(), "Each field must have an element.");

        let error = Form::builder()
            .element(root().as_target())
            .field(FieldDescriptor::new().elements(Vec::new()).validator("isCheckbox"))
            .build()
            .unwrap_err();
        assert_eq!(error.field_index(), Some(0));
    }

    #[test]
    fn test_missing_validator() {
        let input = MemoryControl::text("name");
        let error = Form::builder()
            .element(root().as_target())
            .field(FieldDescriptor::new().element(input.as_control()))
            .build()
            .unwrap_err();
        assert_eq!(error.to_string(), "A validation function is required.");
    }

    #[test]
    fn test_failed_build_binds_nothing() {
        let form_root = root();
        let first = MemoryControl::text("first");
        let second = MemoryControl::text("second");

        let error = Form::builder()
            .element(form_root.as_target())
            .field(FieldDescriptor::new().element(first.as_control()).validator("isString"))
            .field(FieldDescriptor::new().element(second.as_control()).validator("isPhone"))
            .build()
            .unwrap_err();

        assert_eq!(error.to_string(), "Validator \"isPhone\" is not registered.");
        assert_eq!(first.listener_count(), 0);
        assert_eq!(form_root.listener_count(), 0);
    }

    #[test]
    fn test_config_family_mismatch() {
        let input = MemoryControl::text("age");
        let error = Form::builder()
            .element(root().as_target())
            .field(
                FieldDescriptor::new()
                    .element(input.as_control())
                    .validator("isString")
                    .config(NumberConfig::new()),
            )
            .build()
            .unwrap_err();
        assert!(matches!(error, FormError::Config(ConfigError::ConfigMismatch { .. })));
    }

    #[test]
    fn test_bindings_follow_triggers() {
        let form_root = root();
        let button = MemoryElement::new("send");
        let name = MemoryControl::text("name");
        let bio = MemoryControl::text("bio");
        let notes = MemoryControl::text("notes");

        let form = Form::builder()
            .element(form_root.as_target())
            .submit_button(button.as_target())
            .field(FieldDescriptor::new().element(name.as_control()).validator("isString"))
            .field(
                FieldDescriptor::new()
                    .element(bio.as_control())
                    .validator("isString")
                    .on("input"),
            )
            .field(
                FieldDescriptor::new()
                    .element(notes.as_control())
                    .validator("isString")
                    .submit_only(),
            )
            .build()
            .unwrap();

        assert_eq!(name.listener_count_for("blur"), 1);
        assert_eq!(bio.listener_count_for("input"), 1);
        assert_eq!(bio.listener_count_for("blur"), 0);
        assert_eq!(notes.listener_count(), 0);
        assert_eq!(form_root.listener_count(), 1);
        assert_eq!(button.listener_count(), 1);
        assert_eq!(form.binding_count(), 4);
    }

    #[test]
    fn test_live_validation_updates_presentation() {
        let input = MemoryControl::text("username");
        let _form = Form::builder()
            .element(root().as_target())
            .field(
                FieldDescriptor::new()
                    .element(input.as_control())
                    .validator("isString")
                    .config(StringConfig::new().min_length(3)),
            )
            .build()
            .unwrap();

        input.set_value("ab");
        input.dispatch("blur");
        assert_eq!(
            input.validity(),
            crate::memory::Validity::Invalid(
                "The string must be at least 3 characters long.".to_string()
            )
        );

        input.set_value("abc");
        input.dispatch("blur");
        assert_eq!(input.validity(), crate::memory::Validity::Valid);
    }

    #[test]
    fn test_submit_event_prevents_default() {
        let form_root = root();
        let _form = Form::builder()
            .element(form_root.as_target())
            .build()
            .unwrap();
        assert!(form_root.submit().is_default_prevented());
    }

    #[test]
    fn test_override_replaces_builtin() {
        let input = MemoryControl::text("name");
        let form = Form::builder()
            .element(root().as_target())
            .validator(
                "isString",
                validator_fn("isString", |_, _| ValidationResult::invalid("always")),
            )
            .field(FieldDescriptor::new().element(input.as_control()).validator("isString"))
            .build()
            .unwrap();

        assert_eq!(
            form.validate_field(0).and_then(ValidationResult::into_error_message),
            Some("always".to_string())
        );
        assert_eq!(form.validate_field(1), None);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let form_root = root();
        let input = MemoryControl::text("name");
        let form = Form::builder()
            .element(form_root.as_target())
            .field(FieldDescriptor::new().element(input.as_control()).validator("isString"))
            .build()
            .unwrap();

        form.destroy();
        assert!(form.is_destroyed());
        assert_eq!(input.listener_count(), 0);
        assert_eq!(form_root.listener_count(), 0);
        form.destroy();
        assert_eq!(form.binding_count(), 0);
    }

    #[test]
    fn test_drop_releases_listeners() {
        let form_root = root();
        let input = MemoryControl::text("name");
        {
            let _form = Form::builder()
                .element(form_root.as_target())
                .field(FieldDescriptor::new().element(input.as_control()).validator("isString"))
                .build()
                .unwrap();
            assert_eq!(input.listener_count(), 1);
        }
        assert_eq!(input.listener_count(), 0);
        assert_eq!(form_root.listener_count(), 0);
    }
}
