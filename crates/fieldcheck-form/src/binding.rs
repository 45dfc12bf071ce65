//! # Field Binding
//!
//! The per-field surface a rendered field holds across render passes.
//!
//! A renderer typically rebuilds the field's [`ValidationConfig`] on every
//! pass and calls [`FieldBinding::sync`] with it. The binding keeps the last
//! configuration it registered and compares against that slot only, so an
//! unchanged configuration costs one structural comparison and never
//! touches the registry.
//!
//! ```
//! use fieldcheck_core::{FieldPath, ValidationCheck, ValidationConfig};
//! use fieldcheck_form::{FieldBinding, FormValidator};
//! use fieldcheck_rules::StandardEvaluator;
//!
//! let mut form = FormValidator::new(StandardEvaluator);
//! let mut email = FieldBinding::new(FieldPath::new("/email").unwrap());
//! let declare = || ValidationConfig::new().check(ValidationCheck::new("email", "Invalid email"));
//!
//! assert!(email.sync(&mut form, Some(declare())));
//! let revision = form.registry().revision();
//! for _ in 0..10 {
//!     assert!(!email.sync(&mut form, Some(declare())));
//! }
//! assert_eq!(form.registry().revision(), revision);
//! assert!(email.is_valid(&form));
//! ```

use std::sync::Arc;

use fieldcheck_core::{
    validation_config_equal, FieldPath, RuleEvaluator, ValidateOn, ValidationConfig,
    ValidationResult,
};
use serde_json::Value;

use crate::error::FormError;
use crate::store::FieldValidationState;
use crate::validator::FormValidator;

/// Read-only accessor bundle for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    /// The field's stored state, or the default.
    pub state: &'a FieldValidationState,
    /// Errors of the last result, empty when unvalidated.
    pub errors: &'a [String],
    /// Validity of the last result, true when unvalidated.
    pub is_valid: bool,
}

/// A rendered field's handle onto its form.
///
/// Holds only its path and configuration; all state lives in the
/// [`FormValidator`] passed to each call.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    path: FieldPath,
    config: Option<Arc<ValidationConfig>>,
    last_registered: Option<Arc<ValidationConfig>>,
}

impl FieldBinding {
    /// A binding for `path` with no configuration yet.
    pub fn new(path: FieldPath) -> Self {
        Self {
            path,
            config: None,
            last_registered: None,
        }
    }

    /// The bound path.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The configuration from the most recent [`sync`](Self::sync).
    pub fn config(&self) -> Option<&ValidationConfig> {
        self.config.as_deref()
    }

    /// Trigger hint of the current configuration.
    pub fn validate_on(&self) -> Option<ValidateOn> {
        self.config.as_ref().and_then(|c| c.validate_on)
    }

    /// Adopt this pass's configuration, registering it only when it differs
    /// structurally from the last one this binding registered. Returns
    /// whether the registry was written.
    ///
    /// Passing `None` forgets the last-registered marker without touching
    /// the registry. A later reappearance is offered to the registry again,
    /// which keeps its entry if the configuration is unchanged.
    pub fn sync<E: RuleEvaluator>(
        &mut self,
        form: &mut FormValidator<E>,
        config: Option<ValidationConfig>,
    ) -> bool {
        let Some(config) = config else {
            self.config = None;
            self.last_registered = None;
            return false;
        };

        if let Some(last) = &self.last_registered {
            if validation_config_equal(last, &config) {
                self.config = Some(Arc::clone(last));
                return false;
            }
        }

        let config = Arc::new(config);
        let outcome = form.register_field(self.path.clone(), Arc::clone(&config));
        self.last_registered = Some(Arc::clone(&config));
        self.config = Some(config);
        outcome.changed()
    }

    /// The field's stored state.
    pub fn state<'a, E>(&self, form: &'a FormValidator<E>) -> &'a FieldValidationState
    where
        E: RuleEvaluator,
    {
        form.field_state(self.path.as_str())
    }

    /// Errors of the last result, empty when unvalidated.
    pub fn errors<'a, E>(&self, form: &'a FormValidator<E>) -> &'a [String]
    where
        E: RuleEvaluator,
    {
        self.state(form).errors()
    }

    /// Validity of the last result, true when unvalidated.
    pub fn is_valid<E: RuleEvaluator>(&self, form: &FormValidator<E>) -> bool {
        self.state(form).is_valid()
    }

    /// State, errors and validity together.
    pub fn view<'a, E: RuleEvaluator>(&self, form: &'a FormValidator<E>) -> FieldView<'a> {
        let state = self.state(form);
        FieldView {
            state,
            errors: state.errors(),
            is_valid: state.is_valid(),
        }
    }

    /// Validate this field against its current configuration, or an empty
    /// one when none was supplied.
    ///
    /// # Errors
    ///
    /// Propagates [`FormError::Evaluation`] from the form.
    pub fn validate<E: RuleEvaluator>(
        &self,
        form: &mut FormValidator<E>,
        snapshot: &Value,
    ) -> Result<ValidationResult, FormError> {
        match &self.config {
            Some(config) => form.validate(snapshot, &self.path, config),
            None => form.validate(snapshot, &self.path, &ValidationConfig::default()),
        }
    }

    /// Mark this field touched.
    pub fn touch<E: RuleEvaluator>(&self, form: &mut FormValidator<E>) {
        form.touch(&self.path);
    }

    /// Forget this field's validation state.
    pub fn clear<E: RuleEvaluator>(&self, form: &mut FormValidator<E>) {
        form.clear(self.path.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_core::{EvaluationError, ValidationCheck, ValidationContext};
    use serde_json::json;

    type Evaluator = fn(&ValidationConfig, &ValidationContext<'_>) -> Result<ValidationResult, EvaluationError>;

    /// Fails with every message whenever the value is missing.
    fn presence(
        config: &ValidationConfig,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, EvaluationError> {
        if ctx.value.is_some() || config.checks.is_empty() {
            return Ok(ValidationResult::pass());
        }
        Ok(ValidationResult {
            valid: false,
            errors: config.checks.iter().map(|c| c.message.clone()).collect(),
            checks: Vec::new(),
        })
    }

    fn form() -> FormValidator<Evaluator> {
        FormValidator::new(presence as Evaluator)
    }

    fn binding(p: &str) -> FieldBinding {
        FieldBinding::new(FieldPath::new(p).unwrap())
    }

    fn required(message: &str) -> ValidationConfig {
        ValidationConfig::new().check(ValidationCheck::new("required", message))
    }

    #[test]
    fn equal_configs_register_once() {
        let mut form = form();
        let mut field = binding("/name");
        assert!(field.sync(&mut form, Some(required("Required"))));
        let stored = Arc::clone(form.registry().get("/name").unwrap());

        assert!(!field.sync(&mut form, Some(required("Required"))));
        assert!(Arc::ptr_eq(&stored, form.registry().get("/name").unwrap()));
        assert_eq!(form.registry().revision(), 1);
    }

    #[test]
    fn changed_config_reregisters() {
        let mut form = form();
        let mut field = binding("/name");
        field.sync(&mut form, Some(required("Required")));
        assert!(field.sync(&mut form, Some(required("Please enter a name"))));
        assert_eq!(
            form.registry().get("/name").unwrap().checks[0].message,
            "Please enter a name"
        );
    }

    #[test]
    fn absent_config_resets_marker() {
        let mut form = form();
        let mut field = binding("/name");
        field.sync(&mut form, Some(required("Required")));

        assert!(!field.sync(&mut form, None));
        assert!(field.config().is_none());
        assert!(form.registry().contains("/name"));

        assert!(!field.sync(&mut form, Some(required("Required"))));
        assert_eq!(form.registry().revision(), 1);
        assert!(field.sync(&mut form, Some(required("Please enter a name"))));
        assert_eq!(form.registry().revision(), 2);
    }

    #[test]
    fn second_binding_on_registered_path_writes_nothing() {
        let mut form = form();
        let mut first = binding("/name");
        let mut second = binding("/name");
        assert!(first.sync(&mut form, Some(required("Required"))));
        let stored = Arc::clone(form.registry().get("/name").unwrap());

        assert!(!second.sync(&mut form, Some(required("Required"))));
        assert!(Arc::ptr_eq(&stored, form.registry().get("/name").unwrap()));
        assert_eq!(form.registry().revision(), 1);
        assert_eq!(second.config(), Some(&*stored));
    }

    #[test]
    fn unvalidated_field_is_valid() {
        let form = form();
        let field = binding("/name");
        let view = field.view(&form);
        assert!(view.is_valid);
        assert!(view.errors.is_empty());
        assert_eq!(view.state, &FieldValidationState::default());
    }

    #[test]
    fn validate_uses_current_config() {
        let mut form = form();
        let mut field = binding("/name");
        field.sync(&mut form, Some(required("Name is required")));

        let result = field.validate(&mut form, &json!({})).unwrap();
        assert!(!result.valid);
        assert_eq!(field.errors(&form), ["Name is required"]);
        assert!(!field.is_valid(&form));
    }

    #[test]
    fn validate_without_config_passes() {
        let mut form = form();
        let field = binding("/name");
        let result = field.validate(&mut form, &json!({})).unwrap();
        assert!(result.valid);
        assert!(field.state(&form).validated);
    }

    #[test]
    fn touch_and_clear_are_path_bound() {
        let mut form = form();
        let field = binding("/name");
        field.touch(&mut form);
        assert!(form.field_state("/name").touched);
        field.clear(&mut form);
        assert!(form.field_states().entry("/name").is_none());
    }

    #[test]
    fn validate_on_reflects_config() {
        let mut form = form();
        let mut field = binding("/name");
        assert_eq!(field.validate_on(), None);
        field.sync(&mut form, Some(required("R").on(ValidateOn::Change)));
        assert_eq!(field.validate_on(), Some(ValidateOn::Change));
    }
}
