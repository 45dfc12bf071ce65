//! # Field Registry
//!
//! Maps a field path to the configuration it currently declares.
//!
//! ## Invariant
//!
//! Registering a configuration structurally equal to the stored one is a
//! no-op: the stored `Arc` is kept and [`FieldRegistry::revision`] does not
//! advance. Observers that compare revisions (or `Arc` pointers) only see a
//! change when the configuration actually changed.

use std::sync::Arc;

use fieldcheck_core::{validation_config_equal, FieldPath, ValidationConfig};
use indexmap::IndexMap;

/// What a call to [`FieldRegistry::register`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The path was not registered before.
    Inserted,
    /// The path held a structurally different configuration.
    Replaced,
    /// The path already held an equal configuration; nothing was written.
    Unchanged,
}

impl Registration {
    /// Whether the registry was mutated.
    pub fn changed(self) -> bool {
        !matches!(self, Registration::Unchanged)
    }
}

/// Registered field configurations in registration order.
///
/// Replacing a configuration keeps the field's original position, so the
/// enumeration order used by whole-form validation is stable.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: IndexMap<FieldPath, Arc<ValidationConfig>>,
    revision: u64,
}

impl FieldRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent upsert under structural equality.
    pub fn register(
        &mut self,
        path: FieldPath,
        config: impl Into<Arc<ValidationConfig>>,
    ) -> Registration {
        let config = config.into();
        let outcome = match self.fields.get(&path) {
            Some(existing) if validation_config_equal(existing, &config) => {
                return Registration::Unchanged;
            }
            Some(_) => Registration::Replaced,
            None => Registration::Inserted,
        };

        tracing::debug!(%path, checks = config.checks.len(), ?outcome, "field registered");
        self.fields.insert(path, config);
        self.revision += 1;
        outcome
    }

    /// Remove a registration, returning the configuration it held.
    pub fn unregister(&mut self, path: &str) -> Option<Arc<ValidationConfig>> {
        let removed = self.fields.shift_remove(path);
        if removed.is_some() {
            tracing::debug!(path, "field unregistered");
            self.revision += 1;
        }
        removed
    }

    /// The configuration registered at `path`.
    pub fn get(&self, path: &str) -> Option<&Arc<ValidationConfig>> {
        self.fields.get(path)
    }

    /// Whether `path` is registered.
    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    /// Registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &Arc<ValidationConfig>)> {
        self.fields.iter()
    }

    /// Registered paths in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.fields.keys()
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Counter advanced on every real mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
