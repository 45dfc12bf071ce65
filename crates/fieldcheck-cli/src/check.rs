//! # Check Subcommand
//!
//! Validates every field of a form definition against a state snapshot and
//! reports each field's state. Exit code 1 when any field is invalid.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use fieldcheck_form::{FieldValidationState, FormValidator};
use fieldcheck_rules::StandardEvaluator;
use fieldcheck_schema::FormDefinition;

/// Arguments for the `fieldcheck check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Form definition file (YAML or JSON).
    #[arg(long, value_name = "FILE")]
    pub form: PathBuf,

    /// State snapshot to validate (YAML or JSON).
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// How results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per field.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// Outcome of validating a whole form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormReport {
    /// Conjunction of every field's validity.
    pub all_valid: bool,
    /// Field states in definition order.
    pub fields: IndexMap<String, FieldValidationState>,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let definition = FormDefinition::load(&args.form)
        .with_context(|| format!("failed to load form {}", args.form.display()))?;
    let snapshot = crate::load_document(&args.state)?;

    let report = check_form(&definition, &snapshot)?;
    let output = match args.format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };
    println!("{output}");

    Ok(if report.all_valid { 0 } else { 1 })
}

/// Register `definition` into a fresh form and validate it against
/// `snapshot`.
pub fn check_form(definition: &FormDefinition, snapshot: &Value) -> Result<FormReport> {
    let mut form = FormValidator::new(StandardEvaluator);
    let registered = definition.register_into(&mut form);
    tracing::debug!(fields = registered, "registered form fields");

    let all_valid = form.validate_all(snapshot)?;
    let fields = form
        .registry()
        .paths()
        .map(|path| (path.to_string(), form.field_state(path.as_str()).clone()))
        .collect();

    Ok(FormReport { all_valid, fields })
}

/// Human-readable report: a line per field, errors indented below it.
pub fn render_text(report: &FormReport) -> String {
    let mut out = String::new();
    for (path, state) in &report.fields {
        let mark = if state.is_valid() { '✓' } else { '✗' };
        let _ = writeln!(out, "{mark} {path}");
        for error in state.errors() {
            let _ = writeln!(out, "    {error}");
        }
    }
    let invalid = report.fields.values().filter(|s| !s.is_valid()).count();
    if invalid == 0 {
        let _ = write!(out, "\nAll {} field(s) valid.", report.fields.len());
    } else {
        let _ = write!(
            out,
            "\n{invalid} of {} field(s) invalid.",
            report.fields.len()
        );
    }
    out
}
