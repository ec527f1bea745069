//! Headless in-memory document
//!
//! Controls and elements that keep their state in memory and fire listeners
//! on [`dispatch`](MemoryControl::dispatch). They let forms run without a UI
//! toolkit, in tests and from the command line.

use crate::control::{Control, ControlKind, Event, EventHandler, EventTarget, ListenerId};
use crate::error::{FormError, FormResult};
use crate::schema::ElementLookup;
use formguard_validation::{FileInfo, ValidationResult};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

#[derive(Default)]
struct Listeners {
    entries: Mutex<Vec<(String, ListenerId, EventHandler)>>,
}

impl Listeners {
    fn add(&self, event: &str, handler: EventHandler) -> ListenerId {
        let id = ListenerId::new();
        self.entries.lock().push((event.to_string(), id, handler));
        id
    }

    fn remove(&self, event: &str, id: ListenerId) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(kind, listener, _)| !(kind == event && *listener == id));
        entries.len() != before
    }

    fn dispatch(&self, event: &Event) {
        // Handlers may add or remove listeners, so run them unlocked
        let handlers: Vec<EventHandler> = self
            .entries
            .lock()
            .iter()
            .filter(|(kind, _, _)| kind == event.kind())
            .map(|(_, _, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler(event);
        }
    }

    fn count(&self, event: Option<&str>) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|(kind, _, _)| event.map_or(true, |event| kind == event))
            .count()
    }
}

/// Last result shown on a control
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Unknown,
    Valid,
    Invalid(String),
}

#[derive(Debug, Default)]
struct ControlState {
    value: Option<String>,
    checked: bool,
    file: Option<FileInfo>,
    classes: Vec<String>,
    validity: Validity,
}

struct ControlInner {
    id: String,
    kind: ControlKind,
    state: Mutex<ControlState>,
    listeners: Listeners,
}

/// An input control; clones share state
#[derive(Clone)]
pub struct MemoryControl {
    inner: Arc<ControlInner>,
}

impl MemoryControl {
    pub fn new(id: impl Into<String>, kind: ControlKind) -> Self {
        let state = ControlState {
            value: (!kind.is_checkable() && kind != ControlKind::File).then(String::new),
            ..ControlState::default()
        };
        Self {
            inner: Arc::new(ControlInner {
                id: id.into(),
                kind,
                state: Mutex::new(state),
                listeners: Listeners::default(),
            }),
        }
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, ControlKind::Text)
    }

    pub fn select(id: impl Into<String>) -> Self {
        Self::new(id, ControlKind::Select)
    }

    pub fn checkbox(id: impl Into<String>) -> Self {
        Self::new(id, ControlKind::Checkbox)
    }

    pub fn radio(id: impl Into<String>) -> Self {
        Self::new(id, ControlKind::Radio)
    }

    pub fn file(id: impl Into<String>) -> Self {
        Self::new(id, ControlKind::File)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.inner.state.lock().classes.push(class.into());
        self
    }

    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_checked(self, checked: bool) -> Self {
        self.set_checked(checked);
        self
    }

    pub fn with_file(self, file: FileInfo) -> Self {
        self.set_file(Some(file));
        self
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.state.lock().classes.iter().any(|candidate| candidate == class)
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.inner.state.lock().value = Some(value.into());
    }

    pub fn clear_value(&self) {
        self.inner.state.lock().value = None;
    }

    pub fn set_checked(&self, checked: bool) {
        self.inner.state.lock().checked = checked;
    }

    pub fn set_file(&self, file: Option<FileInfo>) {
        self.inner.state.lock().file = file;
    }

    pub fn validity(&self) -> Validity {
        self.inner.state.lock().validity.clone()
    }

    /// Fire `kind` at the control's listeners
    pub fn dispatch(&self, kind: &str) -> Event {
        let event = Event::new(kind);
        self.inner.listeners.dispatch(&event);
        event
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.count(None)
    }

    pub fn listener_count_for(&self, event: &str) -> usize {
        self.inner.listeners.count(Some(event))
    }

    /// Set state from JSON: a string is text, a bool is the checked state and
    /// an object is a file
    pub fn apply_json(&self, value: &Value) -> FormResult<()> {
        match value {
            Value::String(text) => self.set_value(text.clone()),
            Value::Bool(checked) => self.set_checked(*checked),
            Value::Number(number) => self.set_value(number.to_string()),
            Value::Null => {
                self.clear_value();
                self.set_file(None);
            }
            Value::Object(_) => {
                let file = serde_json::from_value(value.clone()).map_err(|source| {
                    FormError::InvalidValue {
                        selector: format!("#{}", self.id()),
                        reason: source.to_string(),
                    }
                })?;
                self.set_file(Some(file));
            }
            Value::Array(_) => {
                return Err(FormError::InvalidValue {
                    selector: format!("#{}", self.id()),
                    reason: "a single control cannot take a list".to_string(),
                })
            }
        }
        Ok(())
    }

    pub fn as_control(&self) -> Arc<dyn Control> {
        Arc::new(self.clone())
    }

    pub fn as_target(&self) -> Arc<dyn EventTarget> {
        Arc::new(self.clone())
    }
}

impl std::fmt::Debug for MemoryControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryControl")
            .field("id", &self.inner.id)
            .field("kind", &self.inner.kind)
            .field("state", &*self.inner.state.lock())
            .finish()
    }
}

impl EventTarget for MemoryControl {
    fn add_listener(&self, event: &str, handler: EventHandler) -> ListenerId {
        self.inner.listeners.add(event, handler)
    }

    fn remove_listener(&self, event: &str, id: ListenerId) -> bool {
        self.inner.listeners.remove(event, id)
    }
}

impl Control for MemoryControl {
    fn control_id(&self) -> &str {
        &self.inner.id
    }

    fn kind(&self) -> ControlKind {
        self.inner.kind
    }

    fn value(&self) -> Option<String> {
        self.inner.state.lock().value.clone()
    }

    fn checked(&self) -> bool {
        self.inner.state.lock().checked
    }

    fn file(&self) -> Option<FileInfo> {
        self.inner.state.lock().file.clone()
    }

    fn set_validity(&self, result: &ValidationResult) {
        self.inner.state.lock().validity = match result.error_message() {
            Some(message) => Validity::Invalid(message.to_string()),
            None => Validity::Valid,
        };
    }
}

/// A non-input element such as a form root or a submit button; clones share
/// listeners
#[derive(Clone, Default)]
pub struct MemoryElement {
    id: String,
    listeners: Arc<Listeners>,
}

impl MemoryElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            listeners: Arc::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dispatch(&self, kind: &str) -> Event {
        let event = Event::new(kind);
        self.listeners.dispatch(&event);
        event
    }

    pub fn submit(&self) -> Event {
        self.dispatch("submit")
    }

    pub fn click(&self) -> Event {
        self.dispatch("click")
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.count(None)
    }

    pub fn as_target(&self) -> Arc<dyn EventTarget> {
        Arc::new(self.clone())
    }
}

impl std::fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryElement")
            .field("id", &self.id)
            .field("listeners", &self.listeners.count(None))
            .finish()
    }
}

impl EventTarget for MemoryElement {
    fn add_listener(&self, event: &str, handler: EventHandler) -> ListenerId {
        self.listeners.add(event, handler)
    }

    fn remove_listener(&self, event: &str, id: ListenerId) -> bool {
        self.listeners.remove(event, id)
    }
}

/// A flat collection of controls and elements addressable by selector.
///
/// Selectors are `#id`, `.class`, or a bare id.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    controls: Vec<MemoryControl>,
    elements: Vec<MemoryElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control and return a handle to it
    pub fn add(&mut self, control: MemoryControl) -> MemoryControl {
        self.controls.push(control.clone());
        control
    }

    pub fn add_element(&mut self, element: MemoryElement) -> MemoryElement {
        self.elements.push(element.clone());
        element
    }

    pub fn controls(&self) -> &[MemoryControl] {
        &self.controls
    }

    /// Controls matching `selector`, in insertion order
    pub fn query(&self, selector: &str) -> Vec<MemoryControl> {
        let selector = selector.trim();
        self.controls
            .iter()
            .filter(|control| match selector.strip_prefix('.') {
                Some(class) => control.has_class(class),
                None => control.id() == selector.strip_prefix('#').unwrap_or(selector),
            })
            .cloned()
            .collect()
    }

    pub fn query_one(&self, selector: &str) -> Option<MemoryControl> {
        self.query(selector).into_iter().next()
    }

    pub fn element(&self, selector: &str) -> Option<MemoryElement> {
        let id = selector.trim();
        let id = id.strip_prefix('#').unwrap_or(id);
        self.elements.iter().find(|element| element.id() == id).cloned()
    }

    /// Apply a JSON value to the controls matching `selector`.
    ///
    /// A list assigns one entry per matching control; any other value goes to
    /// every match. Returns the number of controls touched.
    pub fn fill(&self, selector: &str, value: &Value) -> FormResult<usize> {
        let controls = self.query(selector);
        if controls.is_empty() {
            return Err(FormError::UnresolvedSelector(selector.to_string()));
        }

        match value {
            Value::Array(values) => {
                if values.len() != controls.len() {
                    return Err(FormError::InvalidValue {
                        selector: selector.to_string(),
                        reason: format!(
                            "expected {} values, found {}",
                            controls.len(),
                            values.len()
                        ),
                    });
                }
                for (control, value) in controls.iter().zip(values) {
                    control.apply_json(value)?;
                }
            }
            value => {
                for control in &controls {
                    control.apply_json(value)?;
                }
            }
        }
        Ok(controls.len())
    }
}

impl ElementLookup for MemoryDocument {
    fn find_control(&self, selector: &str) -> Option<Arc<dyn Control>> {
        self.query_one(selector).map(|control| control.as_control())
    }

    fn find_controls(&self, selector: &str) -> Vec<Arc<dyn Control>> {
        self.query(selector)
            .iter()
            .map(MemoryControl::as_control)
            .collect()
    }

    fn find_target(&self, selector: &str) -> Option<Arc<dyn EventTarget>> {
        self.element(selector)
            .map(|element| element.as_target())
            .or_else(|| self.query_one(selector).map(|control| control.as_target()))
    }
}
