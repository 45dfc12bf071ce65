//! Form-level errors.

use fieldcheck_core::{EvaluationError, FieldPath};
use thiserror::Error;

/// Error raised by form operations.
///
/// A field failing its checks is not an error. Only a rule evaluator that
/// cannot run reaches this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The rule evaluator failed while validating a field.
    #[error("evaluation failed for field '{path}': {source}")]
    Evaluation {
        /// The field being validated.
        path: FieldPath,
        /// The evaluator's error.
        source: EvaluationError,
    },
}
