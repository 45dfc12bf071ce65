//! # fieldcheck-schema — Form Definition Documents
//!
//! Loads declarative form definitions from YAML or JSON and registers their
//! fields into a [`FormValidator`](fieldcheck_form::FormValidator).
//!
//! ## Schema Validation (`validate`)
//!
//! Every document is checked against the bundled
//! `schemas/form.schema.json` before deserialization. Failures list every
//! violation with its instance path, schema path and message.
//!
//! ## Definitions (`definition`)
//!
//! - [`FormDefinition::load`] reads a file, choosing YAML or JSON by
//!   extension.
//! - [`FormDefinition::register_into`] registers all fields in declaration
//!   order. A path declared twice keeps its first position and its last
//!   configuration.
//!
//! ## Crate Policy
//!
//! - The schema file must stay in step with the serde shape of
//!   [`ValidationConfig`](fieldcheck_core::ValidationConfig).
//! - Schema validation is the input boundary: a document that fails it is
//!   never partially registered.

pub mod definition;
pub mod validate;

pub use definition::{FieldDefinition, FormDefinition};
pub use validate::{
    yaml_to_json, DefinitionError, FormSchema, ValidationViolations, Violation, FORM_SCHEMA,
};
