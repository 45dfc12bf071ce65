//! # fieldcheck CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fieldcheck_cli::check::{run_check, CheckArgs};
use fieldcheck_cli::lint::{run_lint, LintArgs};

/// Declarative form field validation.
///
/// Validates state snapshots against form definitions and lints form
/// definition documents.
#[derive(Parser, Debug)]
#[command(name = "fieldcheck", version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a state snapshot against a form definition.
    Check(CheckArgs),

    /// Check a form definition document against the form schema.
    Lint(LintArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Lint(args) => run_lint(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_cli::check::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_check_defaults_to_text() {
        let cli =
            Cli::try_parse_from(["fieldcheck", "check", "--form", "f.yaml", "--state", "s.json"])
                .unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.form, PathBuf::from("f.yaml"));
            assert_eq!(args.state, PathBuf::from("s.json"));
            assert_eq!(args.format, OutputFormat::Text);
        } else {
            panic!("expected check");
        }
    }

    #[test]
    fn cli_parse_check_json_format() {
        let cli = Cli::try_parse_from([
            "fieldcheck", "check", "--form", "f.yaml", "--state", "s.json", "--format", "json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Check(CheckArgs { format: OutputFormat::Json, .. })
        ));
    }

    #[test]
    fn cli_parse_check_requires_state() {
        assert!(Cli::try_parse_from(["fieldcheck", "check", "--form", "f.yaml"]).is_err());
    }

    #[test]
    fn cli_parse_lint_verbose() {
        let cli = Cli::try_parse_from(["fieldcheck", "lint", "--form", "f.yaml", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Lint(_)));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["fieldcheck"]).is_err());
    }
}
