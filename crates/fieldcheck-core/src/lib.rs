//! # fieldcheck-core — Foundational Types for Field Validation
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: what a validation configuration looks like, how a field path
//! addresses a value inside a state snapshot, when two configurations are
//! the same, and the trait through which a rule evaluator is plugged in.
//! Every other `fieldcheck-*` crate depends on it; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Configurations are compared structurally.** A renderer may rebuild
//!    its [`ValidationConfig`] on every pass. [`validation_config_equal`]
//!    decides whether two of them are interchangeable, field by field, so
//!    identity never leaks into registration decisions.
//!
//! 2. **Arguments are a tagged union.** A check argument is either a literal
//!    [`Primitive`] or a `{ "$state": path }` reference ([`DynamicValue`]).
//!    Equality compares references by path and never resolves them.
//!
//! 3. **Missing is not an error.** [`resolve_path`] returns `None` for any
//!    path that walks off the snapshot, so a check can report "required"
//!    instead of a resolver failure.
//!
//! 4. **Rule semantics live elsewhere.** [`RuleEvaluator`] is the seam. This
//!    crate never decides what `required` or `email` mean.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fieldcheck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod equality;
pub mod error;
pub mod evaluate;
pub mod path;
pub mod result;

// Re-export primary types for ergonomic imports.
pub use config::{DynamicArgs, DynamicValue, Primitive, ValidateOn, ValidationCheck, ValidationConfig};
pub use equality::{dynamic_args_equal, dynamic_value_equal, validation_config_equal};
pub use error::{CoreError, EvaluationError};
pub use evaluate::{
    CustomFunctions, ResolvedArgs, RuleEvaluator, ValidationContext, ValidationFunction,
};
pub use path::{resolve_path, FieldPath};
pub use result::{CheckOutcome, ValidationResult};
