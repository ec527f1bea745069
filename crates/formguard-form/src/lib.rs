//! # formguard-form
//!
//! Wires UI controls to formguard validators. A [`Form`] validates fields
//! live on their trigger events, runs a full pass on submit, forwards every
//! result to a [`Presenter`], and removes its listeners on teardown.
//!
//! The [`memory`] module provides a headless document for tests and tooling,
//! and [`schema`] builds forms from JSON or YAML descriptions.

pub mod control;
pub mod error;
pub mod field;
pub mod form;
pub mod memory;
pub mod presenter;
pub mod schema;

pub use control::{Control, ControlKind, Event, EventHandler, EventTarget, ListenerId};
pub use error::{FormError, FormResult};
pub use field::{FieldDescriptor, FieldTarget, InvalidField, InvalidFieldReport, Trigger};
pub use form::{CompleteHook, ErrorHook, Form, FormBuilder, SubmitHook, SubmitOutcome};
pub use memory::{MemoryControl, MemoryDocument, MemoryElement, Validity};
pub use presenter::{presenter_fn, ControlPresenter, FnPresenter, Presenter};
pub use schema::{ElementLookup, FieldSchema, FormSchema};

// Validation types used in descriptors
pub use formguard_validation as validation;
