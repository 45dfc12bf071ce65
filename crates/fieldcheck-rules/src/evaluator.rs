//! # Standard Evaluator
//!
//! Runs a configuration's checks in order. Every check runs; there is no
//! short-circuit on the first failure, so `errors` lists every failing
//! message, first failure first.
//!
//! Dispatch order for a check kind: built-in predicate, then custom
//! function. A kind found in neither passes and logs a warning.

use fieldcheck_core::{
    resolve_path, CheckOutcome, DynamicArgs, DynamicValue, EvaluationError, ResolvedArgs,
    RuleEvaluator, ValidationConfig, ValidationContext, ValidationResult,
};
use serde_json::Value;

use crate::builtin::{self, CheckInput};

/// The default rule evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl StandardEvaluator {
    /// Create the evaluator.
    pub fn new() -> Self {
        Self
    }
}

/// Resolve literal and `$state` arguments against the snapshot.
///
/// A reference to a path missing from the snapshot resolves to `null`.
pub fn resolve_args(args: &DynamicArgs, state_model: &Value) -> ResolvedArgs {
    args.iter()
        .map(|(name, arg)| {
            let value = match arg {
                DynamicValue::Literal(p) => p.to_value(),
                DynamicValue::StateRef { state } => {
                    resolve_path(state_model, state).cloned().unwrap_or(Value::Null)
                }
            };
            (name.clone(), value)
        })
        .collect()
}

impl RuleEvaluator for StandardEvaluator {
    fn evaluate(
        &self,
        config: &ValidationConfig,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, EvaluationError> {
        let mut outcomes = Vec::with_capacity(config.checks.len());

        for check in &config.checks {
            let args = resolve_args(&check.args, ctx.state_model);

            let valid = if let Some(predicate) = builtin::lookup(&check.kind) {
                predicate(&CheckInput {
                    kind: &check.kind,
                    value: ctx.value,
                    args: &args,
                })?
            } else if let Some(custom) = ctx.custom_functions.get(&check.kind) {
                custom(ctx.value, &args)
            } else {
                tracing::warn!(kind = %check.kind, "unknown validation check; treating as passed");
                true
            };

            outcomes.push(CheckOutcome {
                kind: check.kind.clone(),
                valid,
                message: check.message.clone(),
            });
        }

        Ok(ValidationResult::from_outcomes(outcomes))
    }
}
