//! Abstractions over the UI controls a form binds to
//!
//! Any toolkit can host a [`Form`](crate::Form) by implementing [`EventTarget`]
//! for its form and button widgets and [`Control`] for its inputs.

use formguard_validation::{FileInfo, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Handle returned by [`EventTarget::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An event delivered to listeners
#[derive(Debug)]
pub struct Event {
    kind: String,
    default_prevented: AtomicBool,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            default_prevented: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Ask the host not to run its default action (e.g. a page submit)
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::SeqCst)
    }
}

pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Something listeners can subscribe to
pub trait EventTarget: Send + Sync {
    fn add_listener(&self, event: &str, handler: EventHandler) -> ListenerId;

    /// Remove a listener; `false` when it was not attached
    fn remove_listener(&self, event: &str, id: ListenerId) -> bool;
}

/// Kind of input a control represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    #[default]
    Text,
    Select,
    Checkbox,
    Radio,
    File,
}

impl ControlKind {
    /// Checkboxes and radios report a checked state rather than text
    pub fn is_checkable(&self) -> bool {
        matches!(self, ControlKind::Checkbox | ControlKind::Radio)
    }
}

/// An input control
pub trait Control: EventTarget {
    fn control_id(&self) -> &str;

    fn kind(&self) -> ControlKind;

    /// Current text; `None` when the control has no value
    fn value(&self) -> Option<String>;

    fn checked(&self) -> bool;

    /// Selected file of a file input
    fn file(&self) -> Option<FileInfo>;

    /// Show the outcome of the latest validation
    fn set_validity(&self, _result: &ValidationResult) {}
}
