//! # fieldcheck-rules — Standard Rule Evaluator
//!
//! The default [`RuleEvaluator`](fieldcheck_core::RuleEvaluator) used by
//! forms that do not bring their own. It resolves `$state` arguments against
//! the snapshot, dispatches each check to a built-in predicate or a custom
//! function, and collects every failure in check order.
//!
//! ## Built-in Checks
//!
//! | Kind | Arguments | Passes when |
//! |---|---|---|
//! | `required` | | value present, not null, not blank, not an empty array |
//! | `email` | | string shaped like `local@domain.tld` |
//! | `minLength` | `min` | string with at least `min` characters |
//! | `maxLength` | `max` | string with at most `max` characters |
//! | `pattern` | `pattern` | string matching the regex |
//! | `min` / `max` | `min` / `max` | number within the bound |
//! | `numeric` | | number, or string that parses as one |
//! | `url` | | string shaped like `scheme://host...` |
//! | `matches` / `equalTo` | `other` | value equals `other` |
//! | `lessThan` / `greaterThan` | `other` | value orders before/after `other` |
//! | `requiredIf` | `field` | `field` is falsy, or value passes `required` |
//!
//! Unknown kinds that are not custom functions pass with a warning.
//!
//! ## Crate Policy
//!
//! - Depends only on `fieldcheck-core` internally.
//! - A missing argument or an uncompilable pattern is an
//!   [`EvaluationError`](fieldcheck_core::EvaluationError), never a silent pass.

pub mod builtin;
pub mod evaluator;

pub use builtin::BUILTIN_KINDS;
pub use evaluator::{resolve_args, StandardEvaluator};
