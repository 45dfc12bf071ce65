//! # Rule-Evaluation Seam
//!
//! The orchestrator never interprets checks itself. It hands the field's
//! configuration and a [`ValidationContext`] to a [`RuleEvaluator`] and
//! stores whatever comes back.
//!
//! Evaluators must be synchronous, must not mutate the context, and must
//! report errors in a stable order. Any closure with the right signature
//! is an evaluator, which keeps test doubles short.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::ValidationConfig;
use crate::error::EvaluationError;
use crate::result::ValidationResult;

/// Check arguments after state references have been resolved.
pub type ResolvedArgs = BTreeMap<String, Value>;

/// A caller-supplied predicate. Receives the field value (`None` when the
/// path did not resolve) and the resolved arguments; returns pass/fail.
pub type ValidationFunction = Arc<dyn Fn(Option<&Value>, &ResolvedArgs) -> bool + Send + Sync>;

/// Named predicates available to checks that reference them by kind.
#[derive(Clone, Default)]
pub struct CustomFunctions {
    functions: BTreeMap<String, ValidationFunction>,
}

impl CustomFunctions {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Option<&Value>, &ResolvedArgs) -> bool + Send + Sync + 'static,
    {
        self.insert(name, f);
        self
    }

    /// Register or replace a predicate.
    pub fn insert<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(Option<&Value>, &ResolvedArgs) -> bool + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(f));
    }

    /// Look up a predicate by name.
    pub fn get(&self, name: &str) -> Option<&ValidationFunction> {
        self.functions.get(name)
    }

    /// Whether a predicate is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if no predicates are registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for CustomFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.functions.keys()).finish()
    }
}

/// Everything an evaluator may read while running a configuration.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The field's resolved value, `None` when the path is unresolved.
    pub value: Option<&'a Value>,
    /// The full state snapshot, for resolving `$state` arguments.
    pub state_model: &'a Value,
    /// Caller-supplied predicates.
    pub custom_functions: &'a CustomFunctions,
}

/// Executes a configuration's checks against a context.
pub trait RuleEvaluator {
    /// Run every check in `config` and report the aggregate result.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] when a check cannot be executed at all.
    /// A check that merely fails is reported in the result, not here.
    fn evaluate(
        &self,
        config: &ValidationConfig,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, EvaluationError>;
}

impl<F> RuleEvaluator for F
where
    F: Fn(&ValidationConfig, &ValidationContext<'_>) -> Result<ValidationResult, EvaluationError>,
{
    fn evaluate(
        &self,
        config: &ValidationConfig,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, EvaluationError> {
        self(config, ctx)
    }
}
