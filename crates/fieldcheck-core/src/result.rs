//! Evaluation results.

use serde::{Deserialize, Serialize};

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// The check kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the check passed.
    pub valid: bool,
    /// The check's configured message, reported or not.
    pub message: String,
}

/// Outcome of evaluating a whole [`ValidationConfig`](crate::ValidationConfig).
///
/// `errors` holds the messages of failing checks in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff no check failed.
    pub valid: bool,
    /// Messages of failing checks, first failure first.
    pub errors: Vec<String>,
    /// Per-check outcomes, when the evaluator reports them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CheckOutcome>,
}

impl ValidationResult {
    /// A passing result with no checks run.
    pub fn pass() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Build a result from per-check outcomes, in order.
    pub fn from_outcomes(checks: Vec<CheckOutcome>) -> Self {
        let errors: Vec<String> = checks
            .iter()
            .filter(|c| !c.valid)
            .map(|c| c.message.clone())
            .collect();
        Self {
            valid: errors.is_empty(),
            errors,
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(kind: &str, valid: bool, message: &str) -> CheckOutcome {
        CheckOutcome {
            kind: kind.into(),
            valid,
            message: message.into(),
        }
    }

    #[test]
    fn errors_follow_check_order() {
        let result = ValidationResult::from_outcomes(vec![
            outcome("required", false, "Required"),
            outcome("email", true, "Bad email"),
            outcome("minLength", false, "Too short"),
        ]);
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Required", "Too short"]);
        assert_eq!(result.checks.len(), 3);
    }

    #[test]
    fn no_checks_is_valid() {
        assert_eq!(ValidationResult::from_outcomes(vec![]), ValidationResult::pass());
    }
}
