//! Presentation of validation results

use crate::field::FieldDescriptor;
use formguard_validation::ValidationResult;
use std::sync::Arc;

/// Receives every result a form produces for one of its fields
pub trait Presenter: Send + Sync {
    fn present(&self, field: &FieldDescriptor, result: &ValidationResult);
}

/// Forwards results to [`Control::set_validity`](crate::Control::set_validity)
/// on every control of the field
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlPresenter;

impl Presenter for ControlPresenter {
    fn present(&self, field: &FieldDescriptor, result: &ValidationResult) {
        if let Some(target) = &field.target {
            for control in target.controls() {
                control.set_validity(result);
            }
        }
    }
}

/// A closure used as a presenter
pub struct FnPresenter<F>(F);

impl<F> Presenter for FnPresenter<F>
where
    F: Fn(&FieldDescriptor, &ValidationResult) + Send + Sync,
{
    fn present(&self, field: &FieldDescriptor, result: &ValidationResult) {
        (self.0)(field, result)
    }
}

pub fn presenter_fn<F>(present: F) -> Arc<dyn Presenter>
where
    F: Fn(&FieldDescriptor, &ValidationResult) + Send + Sync + 'static,
{
    Arc::new(FnPresenter(present))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryControl, Validity};

    #[test]
    fn test_control_presenter_marks_every_control() {
        let first = MemoryControl::radio("plan-basic");
        let second = MemoryControl::radio("plan-pro");
        let field = FieldDescriptor::new().elements(vec![first.as_control(), second.as_control()]);

        ControlPresenter.present(&field, &ValidationResult::invalid("Please select an option."));
        assert_eq!(first.validity(), Validity::Invalid("Please select an option.".to_string()));
        assert_eq!(second.validity(), Validity::Invalid("Please select an option.".to_string()));

        ControlPresenter.present(&field, &ValidationResult::valid());
        assert_eq!(first.validity(), Validity::Valid);
    }
}
