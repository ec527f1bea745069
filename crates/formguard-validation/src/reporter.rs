//! Debug tracing and result callbacks around validator calls

use crate::result::ValidationResult;
use std::fmt;
use std::sync::Arc;

/// Notification invoked with every finalized result
pub type ResultCallback = Arc<dyn Fn(&ValidationResult) + Send + Sync>;

/// Side channels attached to validator invocations.
///
/// When `debug` is on, every result is traced at `DEBUG` level on the
/// `formguard::validation` target together with the value and config that
/// produced it. The callback, if any, fires after the result is final. Neither
/// channel can change the result.
#[derive(Clone, Default)]
pub struct Reporter {
    debug: bool,
    callback: Option<ResultCallback>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ValidationResult) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Run `validator` and report its result
    pub fn run<V, C, F>(&self, name: &str, value: &V, config: &C, validator: F) -> ValidationResult
    where
        V: fmt::Debug + ?Sized,
        C: fmt::Debug + ?Sized,
        F: FnOnce(&V, &C) -> ValidationResult,
    {
        let result = validator(value, config);
        self.report(name, value, config, &result);
        result
    }

    /// Report an already computed result
    pub fn report<V, C>(&self, name: &str, value: &V, config: &C, result: &ValidationResult)
    where
        V: fmt::Debug + ?Sized,
        C: fmt::Debug + ?Sized,
    {
        if self.debug {
            tracing::debug!(
                target: "formguard::validation",
                validator = name,
                value = ?value,
                config = ?config,
                is_valid = result.is_valid(),
                error = result.error_message().unwrap_or(""),
                "validation debugging"
            );
        }

        if let Some(ref callback) = self.callback {
            callback(result);
        }
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("debug", &self.debug)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
