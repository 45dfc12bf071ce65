//! # fieldcheck-form — Field Validation Orchestration
//!
//! Keeps per-field and whole-form validation state consistent while fields
//! (re)declare their configurations on every render pass.
//!
//! ## Components
//!
//! - **Registry** (`registry.rs`): path → current configuration, in
//!   registration order. Re-registering a structurally equal configuration
//!   leaves the stored `Arc` and the revision counter untouched, so a caller
//!   that rebuilds its configuration every pass never looks like a change.
//!
//! - **State store** (`store.rs`): path → `{touched, validated, result}`.
//!   Absent entries read as the default state; `clear` removes the entry.
//!
//! - **Orchestrator** (`validator.rs`): [`FormValidator`] resolves a field's
//!   value from an explicitly passed snapshot, delegates to a
//!   [`RuleEvaluator`](fieldcheck_core::RuleEvaluator) and records the
//!   result. `validate_all` evaluates every registered field and reports the
//!   AND of the results without stopping at the first failure.
//!
//! - **Binding** (`binding.rs`): what a single rendered field holds. It
//!   remembers the last configuration it registered and only writes to the
//!   registry when a new one differs structurally.
//!
//! - **Shared handle** (`shared.rs`): one lock around one form, for callers
//!   that drive a form from several threads.
//!
//! ## Design
//!
//! The state snapshot is a parameter, never ambient state. A test can hand
//! any `serde_json::Value` to [`FormValidator::validate`] and the
//! orchestrator never mutates it.

pub mod binding;
pub mod error;
pub mod registry;
pub mod shared;
pub mod store;
pub mod validator;

pub use binding::{FieldBinding, FieldView};
pub use error::FormError;
pub use registry::{FieldRegistry, Registration};
pub use shared::SharedFormValidator;
pub use store::{FieldStateStore, FieldValidationState};
pub use validator::FormValidator;
