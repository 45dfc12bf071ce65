//! # Error Types
//!
//! Errors raised by the core vocabulary and by rule evaluators. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! A check that reports a value as invalid is *not* an error: it is an
//! ordinary [`ValidationResult`](crate::ValidationResult) with
//! `valid == false`. [`EvaluationError`] is reserved for an evaluator that
//! cannot run a check at all, such as a malformed argument.

use thiserror::Error;

/// Error constructing a core value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Field paths identify a registry slot and must not be empty.
    #[error("field path must not be empty")]
    EmptyPath,
}

/// Failure of a rule evaluator to execute a check.
///
/// Callers propagate this unchanged. Swallowing it would hide a
/// misconfigured check behind a passing result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// A check argument was missing or had an unusable value.
    #[error("check '{kind}' has invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The check kind being evaluated.
        kind: String,
        /// The argument name.
        arg: String,
        /// Why the argument could not be used.
        reason: String,
    },

    /// The evaluator failed for a reason other than its arguments.
    #[error("check '{kind}' could not be evaluated: {reason}")]
    Failed {
        /// The check kind being evaluated.
        kind: String,
        /// Failure description.
        reason: String,
    },
}
