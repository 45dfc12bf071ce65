//! # Built-in Predicates
//!
//! Each predicate sees the field value (`None` when the path did not
//! resolve) and the already-resolved arguments. Arguments that reference
//! missing state resolve to `null`; a predicate treats that as a failing
//! comparison, not as a configuration error.

use std::cmp::Ordering;
use std::sync::OnceLock;

use fieldcheck_core::{EvaluationError, ResolvedArgs};
use regex::Regex;
use serde_json::Value;

/// Every check kind handled without a custom function.
pub const BUILTIN_KINDS: &[&str] = &[
    "required",
    "email",
    "minLength",
    "maxLength",
    "pattern",
    "min",
    "max",
    "numeric",
    "url",
    "matches",
    "equalTo",
    "lessThan",
    "greaterThan",
    "requiredIf",
];

/// Input to a built-in predicate.
pub(crate) struct CheckInput<'a> {
    pub kind: &'a str,
    pub value: Option<&'a Value>,
    pub args: &'a ResolvedArgs,
}

pub(crate) type Builtin = fn(&CheckInput<'_>) -> Result<bool, EvaluationError>;

/// Find the built-in predicate for `kind`.
pub(crate) fn lookup(kind: &str) -> Option<Builtin> {
    let f: Builtin = match kind {
        "required" => required,
        "email" => email,
        "minLength" => min_length,
        "maxLength" => max_length,
        "pattern" => pattern,
        "min" => min,
        "max" => max,
        "numeric" => numeric,
        "url" => url,
        "matches" | "equalTo" => matches,
        "lessThan" => less_than,
        "greaterThan" => greater_than,
        "requiredIf" => required_if,
        _ => return None,
    };
    Some(f)
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+(?:[/?#]\S*)?$").expect("static regex")
    })
}

fn arg<'a>(input: &'a CheckInput<'_>, name: &str) -> Result<&'a Value, EvaluationError> {
    input
        .args
        .get(name)
        .ok_or_else(|| EvaluationError::InvalidArgument {
            kind: input.kind.to_string(),
            arg: name.to_string(),
            reason: "argument is required".to_string(),
        })
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn char_len(value: Option<&Value>) -> Option<usize> {
    value.and_then(Value::as_str).map(|s| s.chars().count())
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn required(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    Ok(is_present(input.value))
}

fn email(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    Ok(input
        .value
        .and_then(Value::as_str)
        .is_some_and(|s| email_regex().is_match(s)))
}

fn url(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    Ok(input
        .value
        .and_then(Value::as_str)
        .is_some_and(|s| url_regex().is_match(s)))
}

fn min_length(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    let min = as_number(arg(input, "min")?);
    Ok(match (char_len(input.value), min) {
        (Some(len), Some(min)) => len as f64 >= min,
        _ => false,
    })
}

fn max_length(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    let max = as_number(arg(input, "max")?);
    Ok(match (char_len(input.value), max) {
        (Some(len), Some(max)) => len as f64 <= max,
        _ => false,
    })
}

fn pattern(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    let source = match arg(input, "pattern")? {
        Value::String(s) => s,
        _ => return Ok(false),
    };
    let re = Regex::new(source).map_err(|e| EvaluationError::InvalidArgument {
        kind: input.kind.to_string(),
        arg: "pattern".to_string(),
        reason: e.to_string(),
    })?;
    Ok(input.value.and_then(Value::as_str).is_some_and(|s| re.is_match(s)))
}

fn min(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    let bound = as_number(arg(input, "min")?);
    let value = input.value.and_then(Value::as_f64);
    Ok(matches!((value, bound), (Some(v), Some(b)) if v >= b))
}

fn max(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    let bound = as_number(arg(input, "max")?);
    let value = input.value.and_then(Value::as_f64);
    Ok(matches!((value, bound), (Some(v), Some(b)) if v <= b))
}

fn numeric(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    Ok(input.value.and_then(as_number).is_some())
}

fn matches(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    let other = arg(input, "other")?;
    Ok(input.value.unwrap_or(&Value::Null) == other)
}

fn compare(value: Option<&Value>, other: &Value) -> Option<Ordering> {
    let value = value?;
    if let (Some(a), Some(b)) = (as_number(value), as_number(other)) {
        return a.partial_cmp(&b);
    }
    match (value, other) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn less_than(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    let other = arg(input, "other")?;
    Ok(compare(input.value, other) == Some(Ordering::Less))
}

fn greater_than(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    let other = arg(input, "other")?;
    Ok(compare(input.value, other) == Some(Ordering::Greater))
}

fn required_if(input: &CheckInput<'_>) -> Result<bool, EvaluationError> {
    let condition = arg(input, "field")?;
    Ok(!is_truthy(condition) || is_present(input.value))
}
