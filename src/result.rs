//! Aggregate counters for a test run.

use std::fmt;

/// Run, failed and errored counters shared by every case of a run.
///
/// Counters only grow; start over by constructing a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestResult {
    run_count: usize,
    failed_count: usize,
    errored_count: usize,
}

impl TestResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn test_started(&mut self) {
        self.run_count += 1;
    }

    pub fn test_failed(&mut self) {
        self.failed_count += 1;
    }

    pub fn test_errored(&mut self) {
        self.errored_count += 1;
    }

    pub fn run_count(&self) -> usize {
        self.run_count
    }

    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    pub fn errored_count(&self) -> usize {
        self.errored_count
    }

    /// At least one test ran and none failed or errored.
    pub fn succeeded(&self) -> bool {
        self.run_count > 0 && self.failed_count == 0 && self.errored_count == 0
    }

    /// `"<run> run, <failed> failed"`, with `", <errored> error"` appended only when something errored.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} run, {} failed", self.run_count, self.failed_count)?;
        if self.errored_count > 0 {
            write!(f, ", {} error", self.errored_count)?;
        }
        Ok(())
    }
}
