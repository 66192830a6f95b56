//! Progress reporting for suite runs.
//!
//! ## Reporter Trait
//!
//! The suite reports through a [`Reporter`] so execution stays separate from output. The default
//! is [`SilentReporter`]; the CLI installs a [`ConsoleReporter`].

use std::io::{self, Write};

use crate::case::Verdict;
use crate::result::TestResult;

/// Trait for reporting test execution progress.
pub trait Reporter {
    /// Called before a test starts
    fn on_test_start(&mut self, _entity: &str, _method: &str) {}

    /// Called when a test completes
    fn on_test_complete(&mut self, entity: &str, method: &str, verdict: Verdict);

    /// Called when all tests have completed
    fn on_run_complete(&mut self, _result: &TestResult) {}
}

/// Reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn on_test_complete(&mut self, _entity: &str, _method: &str, _verdict: Verdict) {}
}

/// Plain-text progress: one character per test, or one line per test when verbose.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write = io::Stderr> {
    out: W,
    verbose: bool,
    reported: usize,
}

impl ConsoleReporter {
    /// Report to standard error.
    pub fn new(verbose: bool) -> Self {
        Self::with_writer(io::stderr(), verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W, verbose: bool) -> Self {
        Self {
            out,
            verbose,
            reported: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Progress output is best-effort: a closed stderr must not abort a test run.
impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_test_start(&mut self, entity: &str, method: &str) {
        if self.verbose {
            let _ = write!(self.out, "{entity}::{method} ... ");
        }
    }

    fn on_test_complete(&mut self, _entity: &str, _method: &str, verdict: Verdict) {
        self.reported += 1;
        if self.verbose {
            let _ = writeln!(self.out, "{}", verdict.as_str());
        } else {
            let mark = match verdict {
                Verdict::Passed => ".",
                Verdict::Failed => "F",
                Verdict::Errored => "E",
            };
            let _ = write!(self.out, "{mark}");
        }
        let _ = self.out.flush();
    }

    fn on_run_complete(&mut self, _result: &TestResult) {
        if !self.verbose && self.reported > 0 {
            let _ = writeln!(self.out);
        }
        let _ = self.out.flush();
    }
}
