//! # Validation Configuration Model
//!
//! The declarative shape a rendered field uses to describe its checks.
//! Wire names match the form definition format: a check's kind is
//! serialized as `type`, the trigger as `validateOn`, and a state
//! reference argument as `{ "$state": "/path" }`.
//!
//! ```
//! use fieldcheck_core::{ValidateOn, ValidationCheck, ValidationConfig};
//!
//! let config = ValidationConfig::new()
//!     .on(ValidateOn::Blur)
//!     .check(ValidationCheck::new("required", "Name is required"))
//!     .check(ValidationCheck::new("minLength", "Too short").with_arg("min", 3));
//! assert_eq!(config.checks.len(), 2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A literal check argument: a JSON scalar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. Integer and float spellings of the same value are equal.
    Number(Number),
    /// A string.
    String(String),
}

impl Primitive {
    /// Convert to a plain JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Primitive::Null => Value::Null,
            Primitive::Bool(b) => Value::Bool(*b),
            Primitive::Number(n) => Value::Number(n.clone()),
            Primitive::String(s) => Value::String(s.clone()),
        }
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Primitive::Null, Primitive::Null) => true,
            (Primitive::Bool(a), Primitive::Bool(b)) => a == b,
            (Primitive::Number(a), Primitive::Number(b)) => numbers_equal(a, b),
            (Primitive::String(a), Primitive::String(b)) => a == b,
            _ => false,
        }
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    a.as_f64() == b.as_f64()
}

/// A check argument that is either a literal or a reference into the state
/// snapshot, resolved by the rule evaluator at evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DynamicValue {
    /// `{ "$state": "/path" }`.
    StateRef {
        /// Path into the state snapshot.
        #[serde(rename = "$state")]
        state: String,
    },
    /// A literal scalar.
    Literal(Primitive),
}

impl DynamicValue {
    /// A reference to the value at `path` in the state snapshot.
    pub fn state(path: impl Into<String>) -> Self {
        DynamicValue::StateRef { state: path.into() }
    }

    /// The referenced path, if this is a state reference.
    pub fn state_path(&self) -> Option<&str> {
        match self {
            DynamicValue::StateRef { state } => Some(state),
            DynamicValue::Literal(_) => None,
        }
    }
}

impl PartialEq for DynamicValue {
    fn eq(&self, other: &Self) -> bool {
        crate::equality::dynamic_value_equal(self, other)
    }
}

impl From<Primitive> for DynamicValue {
    fn from(p: Primitive) -> Self {
        DynamicValue::Literal(p)
    }
}

impl From<bool> for DynamicValue {
    fn from(b: bool) -> Self {
        DynamicValue::Literal(Primitive::Bool(b))
    }
}

impl From<i64> for DynamicValue {
    fn from(n: i64) -> Self {
        DynamicValue::Literal(Primitive::Number(n.into()))
    }
}

impl From<i32> for DynamicValue {
    fn from(n: i32) -> Self {
        DynamicValue::Literal(Primitive::Number(n.into()))
    }
}

impl From<u64> for DynamicValue {
    fn from(n: u64) -> Self {
        DynamicValue::Literal(Primitive::Number(n.into()))
    }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        DynamicValue::Literal(Primitive::String(s.to_string()))
    }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self {
        DynamicValue::Literal(Primitive::String(s))
    }
}

/// Named check arguments. An absent `args` field deserializes to the empty
/// map, so "no arguments" has one representation.
pub type DynamicArgs = BTreeMap<String, DynamicValue>;

/// A single named rule with a user-facing failure message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationCheck {
    /// Rule name, looked up by the evaluator (`required`, `email`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Message reported when the rule fails.
    pub message: String,
    /// Rule arguments.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub args: DynamicArgs,
}

impl ValidationCheck {
    /// A check with no arguments.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            args: DynamicArgs::new(),
        }
    }

    /// Add or replace an argument.
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<DynamicValue>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }
}

/// The event category expected to trigger validation. Advisory: the
/// binding layer reads it, the orchestrator does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidateOn {
    /// On every value change.
    Change,
    /// When the field loses focus.
    Blur,
    /// On form submission.
    Submit,
}

/// A field's validation configuration.
///
/// The default value (no trigger, no checks) is what an unconfigured field
/// validates against, and always passes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Trigger hint. `None` leaves the choice to the binding layer.
    #[serde(rename = "validateOn", default, skip_serializing_if = "Option::is_none")]
    pub validate_on: Option<ValidateOn>,
    /// Checks, in the order they are handed to the evaluator.
    #[serde(default)]
    pub checks: Vec<ValidationCheck>,
}

impl ValidationConfig {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trigger hint.
    pub fn on(mut self, trigger: ValidateOn) -> Self {
        self.validate_on = Some(trigger);
        self
    }

    /// Append a check.
    pub fn check(mut self, check: ValidationCheck) -> Self {
        self.checks.push(check);
        self
    }
}

impl PartialEq for ValidationConfig {
    fn eq(&self, other: &Self) -> bool {
        crate::equality::validation_config_equal(self, other)
    }
}
