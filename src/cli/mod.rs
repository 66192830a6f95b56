//! CLI module for the runit self-test binary
//!
//! Runs the harness's own suite and maps the outcome onto the process exit code.
//!
//! ## Exit codes
//!
//! - `0` - every test passed
//! - `1` - at least one test failed or errored, or nothing ran
//! - `2` - the harness itself failed and the run was aborted
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! `execute` returns `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::RunConfig;
use crate::errors::HarnessError;
use crate::report::ConsoleReporter;
use crate::selftest;
use crate::version::RUNIT_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The harness aborted; distinct from ordinary test failures.
    pub const FATAL: ExitCode = ExitCode(2);
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

    /// Render a harness error as a miette report with exit code 2.
    pub fn fatal(err: HarnessError) -> Self {
        Self::new(format!("{:?}", miette::Report::new(err)), ExitCode::FATAL)
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

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run the runit self-test suite
#[derive(Parser, Debug)]
#[command(name = "runit")]
#[command(version = RUNIT_VERSION)]
#[command(about = "Run the runit self-test suite", long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Stop on first failure
    #[arg(short = 'x', long = "exitfirst")]
    pub stop_on_fail: bool,

    /// Filter tests by keyword expression
    #[arg(short = 'k', value_name = "EXPR")]
    pub filter: Option<String>,

    /// List the selected tests without running them
    #[arg(long)]
    pub list: bool,

    /// Log filter (overrides RUST_LOG)
    #[arg(long = "log", value_name = "FILTER")]
    pub log: Option<String>,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig::new()
            .with_filter(self.filter.clone())
            .with_stop_on_fail(self.stop_on_fail)
            .with_verbose(self.verbose)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

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

/// Structured logging with an env-based filter, defaulting to warn so the summary stays clean.
fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run (or list) the self-test suite and map the result to an exit code.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.run_config();
    let mut suite = selftest::suite()
        .with_config(config.clone())
        .with_reporter(Box::new(ConsoleReporter::new(config.verbose)));

    if cli.list {
        for name in suite.test_names() {
            println!("{name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let result = suite.run().map_err(CliError::fatal)?;
    println!("{}", result.summary());

    Ok(if result.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// ============================================================================
// Tests
// ============================================================================
