//! CLI module for pytest discovery normalization
//!
//! ## Commands
//!
//! - `discover <report>...` - Normalize pytest discovery reports and print the test cases
//! - `--fqn <id>` - Print the fully qualified name of a runner id (debug)
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

use clap::{Parser, Subcommand};

use crate::settings::AdapterSettings;

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
    /// Create a new CLI error with a message and exit code.
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

/// Normalize pytest discovery output into test explorer records
#[derive(Parser, Debug)]
#[command(name = "pytest-discovery")]
#[command(version = VERSION)]
#[command(about = "Normalize pytest discovery output into test explorer records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print the fully qualified name for a runner id (debug)
    #[arg(long = "fqn", value_name = "ID")]
    pub fqn_id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize one or more discovery reports
    Discover {
        /// JSON discovery reports, processed in order
        #[arg(value_name = "REPORT", required = true)]
        reports: Vec<PathBuf>,
        /// Tests belong to a workspace rather than a project
        #[arg(long)]
        workspace: bool,
        /// Executor identity attached to every record
        #[arg(long = "executor-uri", value_name = "URI")]
        executor_uri: Option<String>,
        /// Print the records as a JSON array
        #[arg(long)]
        json: bool,
        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
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
    if let Some(id) = cli.fqn_id {
        return commands::print_fully_qualified_name(&id);
    }

    match cli.command {
        Some(Command::Discover {
            reports,
            workspace,
            executor_uri,
            json,
            verbose,
        }) => {
            let settings = settings_from_flags(workspace, executor_uri);
            commands::discover(&reports, &settings, json, verbose)
        }
        None => Err(CliError::failure(
            "Error: nothing to do (try `pytest-discovery discover <REPORT>`)",
        )),
    }
}

/// Pick the executor matching the host kind unless one was given explicitly.
fn settings_from_flags(workspace: bool, executor_uri: Option<String>) -> AdapterSettings {
    let settings = if workspace {
        AdapterSettings::for_workspace()
    } else {
        AdapterSettings::for_project()
    };
    match executor_uri {
        Some(uri) => settings.with_executor_uri(uri),
        None => settings,
    }
}

// ============================================================================
// Tests
// ============================================================================
