//! # Shared Form Handle
//!
//! A [`FormValidator`] behind a single lock, for hosts that drive one form
//! from several threads. Every operation takes the lock once and runs to
//! completion under it, so `validate_all` never exposes a partially
//! aggregated form to another caller.

use std::sync::Arc;

use fieldcheck_core::{FieldPath, RuleEvaluator, ValidationConfig, ValidationResult};
use parking_lot::Mutex;
use serde_json::Value;

use crate::binding::FieldBinding;
use crate::error::FormError;
use crate::registry::Registration;
use crate::store::FieldValidationState;
use crate::validator::FormValidator;

/// Cloneable, lock-protected handle to one form.
#[derive(Debug)]
pub struct SharedFormValidator<E> {
    inner: Arc<Mutex<FormValidator<E>>>,
}

impl<E> Clone for SharedFormValidator<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: RuleEvaluator> SharedFormValidator<E> {
    /// Wrap a form.
    pub fn new(form: FormValidator<E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(form)),
        }
    }

    /// Run `f` with exclusive access to the form.
    pub fn with<R>(&self, f: impl FnOnce(&mut FormValidator<E>) -> R) -> R {
        let mut form = self.inner.lock();
        f(&mut *form)
    }

    /// See [`FormValidator::register_field`].
    pub fn register_field(&self, path: FieldPath, config: ValidationConfig) -> Registration {
        self.inner.lock().register_field(path, config)
    }

    /// See [`FormValidator::validate`].
    pub fn validate(
        &self,
        snapshot: &Value,
        path: &FieldPath,
        config: &ValidationConfig,
    ) -> Result<ValidationResult, FormError> {
        self.inner.lock().validate(snapshot, path, config)
    }

    /// See [`FormValidator::touch`].
    pub fn touch(&self, path: &FieldPath) {
        self.inner.lock().touch(path);
    }

    /// See [`FormValidator::clear`].
    pub fn clear(&self, path: &str) {
        self.inner.lock().clear(path);
    }

    /// See [`FormValidator::validate_all`].
    pub fn validate_all(&self, snapshot: &Value) -> Result<bool, FormError> {
        self.inner.lock().validate_all(snapshot)
    }

    /// A copy of `path`'s current state.
    pub fn field_state(&self, path: &str) -> FieldValidationState {
        self.inner.lock().field_state(path).clone()
    }

    /// See [`FieldBinding::sync`].
    pub fn sync_binding(&self, binding: &mut FieldBinding, config: Option<ValidationConfig>) -> bool {
        let mut form = self.inner.lock();
        binding.sync(&mut *form, config)
    }
}
