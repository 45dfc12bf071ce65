//! # Field State Store
//!
//! Derived validation state per field path. Entries are created lazily by
//! `touch` or by recording a result, and only `clear` removes them. A path
//! with no entry reads as [`FieldValidationState::default`], which is how
//! "never evaluated" is told apart from "evaluated".

use fieldcheck_core::{FieldPath, ValidationResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Validation state of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidationState {
    /// The field has been touched (left, validated, or explicitly marked).
    pub touched: bool,
    /// The field has been evaluated at least once since its last clear.
    pub validated: bool,
    /// The most recent evaluation result.
    pub result: Option<ValidationResult>,
}

impl FieldValidationState {
    /// Errors of the last result, empty when unvalidated.
    pub fn errors(&self) -> &[String] {
        self.result
            .as_ref()
            .map(|r| r.errors.as_slice())
            .unwrap_or_default()
    }

    /// Validity of the last result. An unvalidated field is valid: it has
    /// not been proven invalid.
    pub fn is_valid(&self) -> bool {
        self.result.as_ref().map_or(true, |r| r.valid)
    }
}

static DEFAULT_STATE: FieldValidationState = FieldValidationState {
    touched: false,
    validated: false,
    result: None,
};

/// Per-field validation state keyed by path.
#[derive(Debug, Clone, Default)]
pub struct FieldStateStore {
    states: IndexMap<FieldPath, FieldValidationState>,
    revision: u64,
}

impl FieldStateStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// State at `path`, or the default state when there is no entry.
    pub fn get(&self, path: &str) -> &FieldValidationState {
        self.states.get(path).unwrap_or(&DEFAULT_STATE)
    }

    /// The stored entry at `path`, if any.
    pub fn entry(&self, path: &str) -> Option<&FieldValidationState> {
        self.states.get(path)
    }

    /// Mark `path` touched, keeping any existing `validated`/`result`.
    pub fn touch(&mut self, path: &FieldPath) {
        match self.states.get_mut(path) {
            Some(state) => state.touched = true,
            None => {
                self.states.insert(
                    path.clone(),
                    FieldValidationState {
                        touched: true,
                        ..FieldValidationState::default()
                    },
                );
            }
        }
        self.revision += 1;
    }

    /// Store a fresh result. `touched` is kept if an entry exists and
    /// becomes true otherwise; `validated` becomes true.
    ///
    /// Always writes, even when the result equals the previous one.
    pub fn record(&mut self, path: &FieldPath, result: ValidationResult) {
        let touched = self.states.get(path).map_or(true, |s| s.touched);
        self.states.insert(
            path.clone(),
            FieldValidationState {
                touched,
                validated: true,
                result: Some(result),
            },
        );
        self.revision += 1;
    }

    /// Remove the entry at `path`. Returns whether one existed.
    pub fn clear(&mut self, path: &str) -> bool {
        let removed = self.states.shift_remove(path).is_some();
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Stored entries in first-write order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldValidationState)> {
        self.states.iter()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if there are no stored entries.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Counter advanced on every write.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
