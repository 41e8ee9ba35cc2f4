//! CLI module for the query bean generator
//!
//! ## Commands
//!
//! - `generate <SNAPSHOT>` - Generate query beans, manifest and module-info loader from a type snapshot
//! - `manifest <FILE>` - Print the packages and entity groups recorded in a manifest
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a `miette` diagnostic as the error message.
    pub fn report(err: impl miette::Diagnostic + Send + Sync + 'static) -> Self {
        Self::failure(format!("{:?}", miette::Report::new(err)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate type-safe query beans from entity type snapshots
#[derive(Parser, Debug)]
#[command(name = "querybean-gen")]
#[command(version = VERSION)]
#[command(about = "Generate type-safe query beans from entity type snapshots", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate query beans, manifest and module-info loader
    Generate(GenerateArgs),

    /// Print the contents of a module manifest
    Manifest {
        /// Manifest file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// JSON type snapshot
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
    /// Source output directory
    #[arg(long, value_name = "DIR", default_value = "generated")]
    pub out: PathBuf,
    /// Resource output directory (default: the source output directory)
    #[arg(long, value_name = "DIR")]
    pub resources: Option<PathBuf>,
    /// Package of the module-info loader (default: common package of the entities)
    #[arg(long, value_name = "PKG")]
    pub module_package: Option<String>,
    /// Path depth for associations of root query beans
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub max_depth: u32,
    /// Do not annotate generated sources with @Generated
    #[arg(long)]
    pub no_generated_annotation: bool,
    /// Ignore the existing manifest instead of merging it
    #[arg(long)]
    pub full: bool,
    /// Render in memory and list the files instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate(args) => commands::generate(&args),
        Command::Manifest { file } => commands::print_manifest(&file),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["querybean-gen", "generate", "model.json"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("Expected Generate command");
        };
        assert_eq!(args.snapshot, PathBuf::from("model.json"));
        assert_eq!(args.out, PathBuf::from("generated"));
        assert_eq!(args.max_depth, 1);
        assert!(args.resources.is_none());
        assert!(!args.no_generated_annotation);
        assert!(!args.full);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_cli_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "querybean-gen",
            "generate",
            "model.json",
            "--out",
            "src/main/java",
            "--resources",
            "src/main/resources",
            "--module-package",
            "org.example",
            "--max-depth",
            "3",
            "--no-generated-annotation",
            "--full",
            "--dry-run",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("Expected Generate command");
        };
        assert_eq!(args.resources, Some(PathBuf::from("src/main/resources")));
        assert_eq!(args.module_package.as_deref(), Some("org.example"));
        assert_eq!(args.max_depth, 3);
        assert!(args.no_generated_annotation && args.full && args.dry_run);
    }

    #[test]
    fn test_cli_parse_manifest() {
        let cli = Cli::try_parse_from(["querybean-gen", "manifest", "info.mf"]).unwrap();
        assert!(matches!(cli.command, Command::Manifest { .. }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["querybean-gen"]).is_err());
    }

    #[test]
    fn test_cli_error_failure_code() {
        let err = CliError::failure("boom");
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert_eq!(err.to_string(), "boom");
    }
}
