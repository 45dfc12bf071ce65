//! # fieldcheck-cli — Form Validation Command-Line Interface
//!
//! Runs a form definition against a state snapshot from the shell, for CI
//! checks of fixture data and for linting definition files.
//!
//! ## Subcommands
//!
//! - `check`: validate every field of a form against a snapshot
//! - `lint`: schema-check a form definition document
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here return an exit code.
//! - Handlers delegate to the library crates. No validation logic here.
//! - Exit codes: 0 success, 1 invalid input or operational error.

pub mod check;
pub mod lint;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Load a JSON or YAML document as a JSON tree. `.yaml`/`.yml` files are
/// read as YAML, anything else as JSON.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "yaml" | "yml" => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML in {}", path.display()))?;
            fieldcheck_schema::yaml_to_json(&yaml)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("cannot convert {} to JSON", path.display()))
        }
        _ => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_with(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_json_document() {
        let file = temp_with(".json", r#"{"name": "Ada"}"#);
        let value = load_document(file.path()).unwrap();
        assert_eq!(value["name"], "Ada");
    }

    #[test]
    fn loads_yaml_document() {
        let file = temp_with(".yml", "name: Ada\nage: 36\n");
        let value = load_document(file.path()).unwrap();
        assert_eq!(value["age"], 36);
    }

    #[test]
    fn reports_unreadable_file() {
        let err = load_document(Path::new("/nonexistent/state.json")).unwrap_err();
        assert!(format!("{err:#}").contains("cannot read"));
    }

    #[test]
    fn reports_malformed_json() {
        let file = temp_with(".json", "{");
        let err = load_document(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid JSON"));
    }
}
