//! # Lint Subcommand
//!
//! Schema-checks a form definition document without evaluating anything.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use fieldcheck_schema::{DefinitionError, FormDefinition};

/// Arguments for the `fieldcheck lint` subcommand.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Form definition file (YAML or JSON).
    #[arg(long, value_name = "FILE")]
    pub form: PathBuf,
}

/// Execute the lint subcommand.
///
/// Returns exit code 0 when the document is well formed, 1 when it breaks
/// the form schema. Unreadable files are errors.
pub fn run_lint(args: &LintArgs) -> Result<u8> {
    match FormDefinition::load(&args.form) {
        Ok(definition) => {
            println!(
                "OK: {} ({} field(s))",
                args.form.display(),
                definition.fields.len()
            );
            Ok(0)
        }
        Err(DefinitionError::ValidationFailed {
            source_name,
            violations,
        }) => {
            println!("FAIL: {source_name} ({} violation(s))", violations.len());
            println!("{violations}");
            Ok(1)
        }
        Err(DefinitionError::Malformed {
            source_name,
            reason,
        }) => {
            println!("FAIL: {source_name}: {reason}");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}
