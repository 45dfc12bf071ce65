//! # Form Definitions
//!
//! The declarative description of a form: each field's path and the
//! validation configuration it declares. Loading always runs the document
//! through [`FormSchema`] first, so shape errors come back as a full
//! violation list instead of a single deserializer message.

use std::collections::HashSet;
use std::path::Path;

use fieldcheck_core::{FieldPath, RuleEvaluator, ValidationConfig};
use fieldcheck_form::{FieldBinding, FormValidator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{yaml_to_json, DefinitionError, FormSchema};

/// One field of a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Location of the field's value in the state snapshot.
    pub path: FieldPath,
    /// Declared validation. Omitted means no checks.
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// A form definition document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDefinition>,
}

impl FormDefinition {
    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str, source_name: &str) -> Result<Self, DefinitionError> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| DefinitionError::DocumentLoad {
                path: source_name.to_string(),
                reason: format!("invalid YAML: {e}"),
            })?;
        let value = yaml_to_json(&yaml).map_err(|e| DefinitionError::DocumentLoad {
            path: source_name.to_string(),
            reason: format!("YAML-to-JSON conversion failed: {e}"),
        })?;
        Self::from_value(value, source_name)
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str, source_name: &str) -> Result<Self, DefinitionError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| DefinitionError::DocumentLoad {
                path: source_name.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
        Self::from_value(value, source_name)
    }

    /// Schema-check and deserialize an already parsed document.
    ///
    /// # Errors
    ///
    /// [`DefinitionError::ValidationFailed`] when the document breaks the
    /// form schema, [`DefinitionError::Malformed`] when it passes the schema
    /// but still cannot be deserialized.
    pub fn from_value(value: Value, source_name: &str) -> Result<Self, DefinitionError> {
        FormSchema::shared()?.check(&value, source_name)?;

        let definition: Self =
            serde_json::from_value(value).map_err(|e| DefinitionError::Malformed {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;

        let mut seen = HashSet::new();
        for field in &definition.fields {
            if !seen.insert(field.path.as_str()) {
                tracing::warn!(
                    source = source_name,
                    path = %field.path,
                    "field declared more than once; the last declaration wins"
                );
            }
        }

        Ok(definition)
    }

    /// Load a definition file. `.yaml`/`.yml` files are read as YAML,
    /// anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|e| DefinitionError::DocumentLoad {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        let source_name = path.display().to_string();

        match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
            "yaml" | "yml" => Self::from_yaml_str(&content, &source_name),
            _ => Self::from_json_str(&content, &source_name),
        }
    }

    /// Register every field into `form` in declaration order. Returns the
    /// number of registrations that changed the registry.
    pub fn register_into<E: RuleEvaluator>(&self, form: &mut FormValidator<E>) -> usize {
        self.fields
            .iter()
            .filter(|field| {
                form.register_field(field.path.clone(), field.validation.clone())
                    .changed()
            })
            .count()
    }

    /// One synced binding per field, for hosts that drive fields
    /// individually. Duplicate paths yield one binding each.
    pub fn bindings<E: RuleEvaluator>(&self, form: &mut FormValidator<E>) -> Vec<FieldBinding> {
        self.fields
            .iter()
            .map(|field| {
                let mut binding = FieldBinding::new(field.path.clone());
                binding.sync(&mut *form, Some(field.validation.clone()));
                binding
            })
            .collect()
    }
}
