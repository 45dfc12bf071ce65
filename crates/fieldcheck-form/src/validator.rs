//! # Validation Orchestrator
//!
//! [`FormValidator`] owns a form's registry and state store for the
//! lifetime of the form. All mutation is synchronous and happens inside the
//! call that triggered it.
//!
//! ```
//! use fieldcheck_core::{FieldPath, ValidationCheck, ValidationConfig};
//! use fieldcheck_form::FormValidator;
//! use fieldcheck_rules::StandardEvaluator;
//! use serde_json::json;
//!
//! let mut form = FormValidator::new(StandardEvaluator);
//! let name = FieldPath::new("/name").unwrap();
//! form.register_field(
//!     name.clone(),
//!     ValidationConfig::new().check(ValidationCheck::new("required", "Name is required")),
//! );
//!
//! let all_valid = form.validate_all(&json!({"name": ""})).unwrap();
//! assert!(!all_valid);
//! assert_eq!(form.field_state("/name").errors(), ["Name is required"]);
//! ```

use std::sync::Arc;

use fieldcheck_core::{
    CustomFunctions, FieldPath, RuleEvaluator, ValidationConfig, ValidationContext,
    ValidationResult,
};
use serde_json::Value;

use crate::error::FormError;
use crate::registry::{FieldRegistry, Registration};
use crate::store::{FieldStateStore, FieldValidationState};

/// Validation state and registrations of one form.
#[derive(Debug, Clone)]
pub struct FormValidator<E> {
    evaluator: E,
    custom_functions: CustomFunctions,
    registry: FieldRegistry,
    states: FieldStateStore,
}

impl<E: RuleEvaluator> FormValidator<E> {
    /// A form with no custom functions.
    pub fn new(evaluator: E) -> Self {
        Self::with_custom_functions(evaluator, CustomFunctions::new())
    }

    /// A form whose checks may reference the given custom functions by kind.
    pub fn with_custom_functions(evaluator: E, custom_functions: CustomFunctions) -> Self {
        Self {
            evaluator,
            custom_functions,
            registry: FieldRegistry::new(),
            states: FieldStateStore::new(),
        }
    }

    /// Declare `path`'s configuration. Structurally equal re-registration
    /// is a no-op; see [`FieldRegistry::register`].
    pub fn register_field(
        &mut self,
        path: FieldPath,
        config: impl Into<Arc<ValidationConfig>>,
    ) -> Registration {
        self.registry.register(path, config)
    }

    /// Remove `path`'s registration. Its validation state is left alone.
    pub fn unregister_field(&mut self, path: &str) -> Option<Arc<ValidationConfig>> {
        self.registry.unregister(path)
    }

    /// Validate `path` against `config` using the value found in `snapshot`.
    ///
    /// `config` need not be the registered one, and `path` need not be
    /// registered. An unresolvable path validates `None`. The result is
    /// always recorded, then returned.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Evaluation`] if the evaluator cannot run. No
    /// state is recorded in that case.
    pub fn validate(
        &mut self,
        snapshot: &Value,
        path: &FieldPath,
        config: &ValidationConfig,
    ) -> Result<ValidationResult, FormError> {
        evaluate_into(
            &self.evaluator,
            &self.custom_functions,
            &mut self.states,
            snapshot,
            path,
            config,
        )
    }

    /// Mark `path` touched without evaluating it.
    pub fn touch(&mut self, path: &FieldPath) {
        self.states.touch(path);
    }

    /// Forget `path`'s validation state.
    pub fn clear(&mut self, path: &str) {
        self.states.clear(path);
    }

    /// Validate every registered field, in registration order, and return
    /// whether all of them passed.
    ///
    /// A failing field does not stop the iteration: every field's state is
    /// updated so all errors can be shown at once.
    ///
    /// # Errors
    ///
    /// An evaluator failure aborts the iteration and is returned. Fields
    /// validated before it keep their recorded results.
    pub fn validate_all(&mut self, snapshot: &Value) -> Result<bool, FormError> {
        let mut all_valid = true;
        for (path, config) in self.registry.iter() {
            let result = evaluate_into(
                &self.evaluator,
                &self.custom_functions,
                &mut self.states,
                snapshot,
                path,
                config,
            )?;
            all_valid &= result.valid;
        }
        tracing::debug!(fields = self.registry.len(), all_valid, "form validated");
        Ok(all_valid)
    }

    /// Current state of `path`, the default state if it has none.
    pub fn field_state(&self, path: &str) -> &FieldValidationState {
        self.states.get(path)
    }

    /// All stored field states.
    pub fn field_states(&self) -> &FieldStateStore {
        &self.states
    }

    /// The field registry.
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Custom functions available to checks.
    pub fn custom_functions(&self) -> &CustomFunctions {
        &self.custom_functions
    }

    /// The rule evaluator.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}

fn evaluate_into<E: RuleEvaluator>(
    evaluator: &E,
    custom_functions: &CustomFunctions,
    states: &mut FieldStateStore,
    snapshot: &Value,
    path: &FieldPath,
    config: &ValidationConfig,
) -> Result<ValidationResult, FormError> {
    let ctx = ValidationContext {
        value: path.resolve(snapshot),
        state_model: snapshot,
        custom_functions,
    };
    let result = evaluator
        .evaluate(config, &ctx)
        .map_err(|source| FormError::Evaluation {
            path: path.clone(),
            source,
        })?;

    tracing::debug!(%path, valid = result.valid, errors = result.errors.len(), "field validated");
    states.record(path, result.clone());
    Ok(result)
}
