//! # Form Definition Schema Validation
//!
//! Checks the shape of a form definition document against the bundled
//! `schemas/form.schema.json` (Draft 2020-12) before it is deserialized.
//!
//! ## Boundary
//!
//! A form definition is external input. Documents that fail the schema are
//! rejected with every violation listed, each with the offending instance
//! path and the schema rule it broke, rather than the first serde error.
//!
//! The schema is self-contained: it only uses internal `#/$defs/...`
//! references, so no retriever is installed.

use std::fmt;
use std::sync::OnceLock;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// The bundled form definition schema.
pub const FORM_SCHEMA: &str = include_str!("../schemas/form.schema.json");

/// Error loading or checking a form definition.
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// The document did not conform to the form schema.
    #[error("form definition '{source_name}' does not conform to the form schema:\n{violations}")]
    ValidationFailed {
        /// File name or other label of the document.
        source_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path or label of the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The bundled schema could not be compiled.
    #[error("form schema could not be compiled: {reason}")]
    SchemaBuild {
        /// Compiler message.
        reason: String,
    },

    /// The document passed the schema but could not be deserialized.
    #[error("form definition '{source_name}' is malformed: {reason}")]
    Malformed {
        /// File name or other label of the document.
        source_name: String,
        /// Deserializer message.
        reason: String,
    },
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending part of the document.
    pub instance_path: String,
    /// JSON Pointer to the schema rule that rejected it.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    /// Where the violation sits, with the document root spelled out.
    pub fn location(&self) -> &str {
        if self.instance_path.is_empty() {
            "document root"
        } else {
            &self.instance_path
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: {}", self.location(), self.message)
    }
}

/// All violations found in one document, in document order. Displays as
/// one indented bullet per violation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations(Vec<Violation>);

impl ValidationViolations {
    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document conformed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The violations as a slice.
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }
}

impl FromIterator<Violation> for ValidationViolations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.0.iter();
        if let Some(first) = lines.next() {
            write!(f, "  - {first}")?;
        }
        lines.try_for_each(|v| write!(f, "\n  - {v}"))
    }
}

/// Compiled form definition schema.
pub struct FormSchema {
    validator: Validator,
}

impl fmt::Debug for FormSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSchema").finish_non_exhaustive()
    }
}

impl FormSchema {
    /// Compile the bundled schema.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::SchemaBuild`] if the bundled schema is
    /// not valid JSON or not a valid Draft 2020-12 schema.
    pub fn bundled() -> Result<Self, DefinitionError> {
        let schema: Value =
            serde_json::from_str(FORM_SCHEMA).map_err(|e| DefinitionError::SchemaBuild {
                reason: format!("invalid JSON: {e}"),
            })?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts.build(&schema).map_err(|e| DefinitionError::SchemaBuild {
            reason: e.to_string(),
        })?;

        Ok(Self { validator })
    }

    /// The bundled schema, compiled once per process.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::SchemaBuild`] on every call if the first
    /// compilation failed.
    pub fn shared() -> Result<&'static Self, DefinitionError> {
        static SCHEMA: OnceLock<Result<FormSchema, String>> = OnceLock::new();
        SCHEMA
            .get_or_init(|| Self::bundled().map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|reason| DefinitionError::SchemaBuild {
                reason: reason.clone(),
            })
    }

    /// Every violation of the schema in `instance`, in document order.
    pub fn violations(&self, instance: &Value) -> ValidationViolations {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }

    /// Check `instance`, labelling any failure with `source_name`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::ValidationFailed`] listing every violation.
    pub fn check(&self, instance: &Value, source_name: &str) -> Result<(), DefinitionError> {
        let violations = self.violations(instance);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DefinitionError::ValidationFailed {
                source_name: source_name.to_string(),
                violations,
            })
        }
    }
}

/// Convert a YAML document tree to the JSON tree the schema and the state
/// model work with. Tags are dropped; non-string scalar keys are
/// stringified.
pub fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => yaml_number(n)?,
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => {
            Value::Array(items.iter().map(yaml_to_json).collect::<Result<_, _>>()?)
        }
        Yaml::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                object.insert(yaml_key(k)?, yaml_to_json(v)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(&tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Value, String> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("cannot represent number {n} in JSON"))
}

fn yaml_key(key: &serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        other => Err(format!("unsupported YAML map key: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bundled_schema_compiles() {
        FormSchema::bundled().unwrap();
    }

    #[test]
    fn accepts_minimal_definition() {
        let schema = FormSchema::bundled().unwrap();
        schema.check(&json!({"fields": []}), "inline").unwrap();
    }

    #[test]
    fn accepts_full_definition() {
        let schema = FormSchema::bundled().unwrap();
        let doc = json!({
            "title": "Sign up",
            "fields": [
                {"path": "/name", "validation": {"validateOn": "blur", "checks": [
                    {"type": "required", "message": "Name is required"}
                ]}},
                {"path": "/confirm", "validation": {"checks": [
                    {"type": "matches", "message": "Must match", "args": {"other": {"$state": "/password"}}},
                    {"type": "minLength", "message": "Too short", "args": {"min": 8}}
                ]}},
                {"path": "/nickname"}
            ]
        });
        schema.check(&doc, "inline").unwrap();
    }

    #[test]
    fn reports_every_violation() {
        let schema = FormSchema::bundled().unwrap();
        let doc = json!({
            "fields": [
                {"path": ""},
                {"path": "/x", "validation": {"validateOn": "hover"}},
                {"path": "/y", "validation": {"checks": [{"type": "required"}]}}
            ]
        });
        let err = schema.check(&doc, "bad.yaml").unwrap_err();
        match err {
            DefinitionError::ValidationFailed { source_name, violations } => {
                assert_eq!(source_name, "bad.yaml");
                assert!(violations.len() >= 3, "got: {violations}");
                let paths: Vec<&str> = violations
                    .violations()
                    .iter()
                    .map(|v| v.instance_path.as_str())
                    .collect();
                assert!(paths.contains(&"/fields/0/path"), "{paths:?}");
                assert!(paths.contains(&"/fields/1/validation/validateOn"), "{paths:?}");
                assert!(paths.contains(&"/fields/2/validation/checks/0"), "{paths:?}");
            }
            other => panic!("Expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn rejects_nested_literal_arguments() {
        let schema = FormSchema::bundled().unwrap();
        let doc = json!({"fields": [{"path": "/x", "validation": {"checks": [
            {"type": "oneOf", "message": "bad", "args": {"values": [1, 2]}}
        ]}}]});
        assert!(schema.check(&doc, "inline").is_err());
    }

    #[test]
    fn rejects_unknown_top_level_keys() {
        let schema = FormSchema::bundled().unwrap();
        let err = schema
            .check(&json!({"fields": [], "extra": true}), "inline")
            .unwrap_err();
        assert!(matches!(err, DefinitionError::ValidationFailed { .. }));
    }

    #[test]
    fn yaml_conversion() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            r#"
fields:
  - path: /age
    validation:
      checks:
        - type: min
          message: Too young
          args:
            min: 18
            strict: true
            ratio: 0.5
"#,
        )
        .unwrap();
        let value = yaml_to_json(&yaml).unwrap();
        let args = &value["fields"][0]["validation"]["checks"][0]["args"];
        assert_eq!(args["min"], 18);
        assert_eq!(args["strict"], true);
        assert_eq!(args["ratio"], 0.5);
    }

    #[test]
    fn shared_schema_is_compiled_once() {
        let first = FormSchema::shared().unwrap();
        let second = FormSchema::shared().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn violation_display_format() {
        let v = Violation {
            instance_path: "/fields/0/path".to_string(),
            schema_path: "/$defs/field/properties/path/minLength".to_string(),
            message: r#""" is shorter than 1 character"#.to_string(),
        };
        assert_eq!(v.to_string(), r#"at /fields/0/path: "" is shorter than 1 character"#);

        let root = Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""fields" is a required property"#.to_string(),
        };
        assert_eq!(root.location(), "document root");

        let all: ValidationViolations = vec![v, root].into_iter().collect();
        assert_eq!(
            all.to_string(),
            "  - at /fields/0/path: \"\" is shorter than 1 character\n  - at document root: \"fields\" is a required property"
        );
    }
}
