//! Entities the self-tests run as nested cases.
//!
//! Each fixture records what happened to it so a test can inspect the lifecycle afterwards.

use crate::case::TestCase;
use crate::errors::{AssertionFailure, Outcome, raise};
use crate::result::TestResult;
use crate::{TestContext, test_entity};

/// One passing test and one that errors through a helper. Logs every lifecycle step.
#[derive(Debug, Default)]
pub struct WasRun {
    pub log: Vec<&'static str>,
}

#[test_entity]
impl WasRun {
    fn set_up(&mut self) {
        self.log.push("set_up");
    }

    pub fn test_method(&mut self) {
        self.log.push("test_method");
    }

    pub fn test_broken_method(&mut self) -> Outcome {
        self.sub_method()
    }

    pub fn sub_method(&mut self) -> Outcome {
        raise("broken method")
    }

    fn tear_down(&mut self) {
        self.log.push("tear_down");
    }
}

/// Set-up fails through a helper, so the body never runs.
#[derive(Debug, Default)]
pub struct WontRun {
    pub log: Vec<&'static str>,
}

#[test_entity]
impl WontRun {
    fn set_up(&mut self) -> Outcome {
        self.sub_method()
    }

    pub fn sub_method(&mut self) -> Outcome {
        raise("won't run")
    }

    pub fn test_method(&mut self) {
        self.log.push("test_method");
    }

    fn tear_down(&mut self) {
        self.log.push("tear_down");
    }
}

/// A body that fails an assertion.
#[derive(Debug, Default)]
pub struct FailsCheck {
    pub log: Vec<&'static str>,
}

#[test_entity]
impl FailsCheck {
    pub fn test_failing_check(&mut self, t: &TestContext<'_>) -> Result<(), AssertionFailure> {
        self.log.push("test_failing_check");
        t.fail("always fails")
    }

    fn tear_down(&mut self) {
        self.log.push("tear_down");
    }
}

/// One passing test, one erroring test.
#[derive(Debug, Default)]
pub struct MixedResults;

#[test_entity]
impl MixedResults {
    pub fn test_passes(&self) {}

    pub fn test_errors(&self) -> Outcome {
        raise("unexpected state")
    }
}

/// Tear-down fails, which the harness treats as fatal.
#[derive(Debug, Default)]
pub struct TearDownFails;

#[test_entity]
impl TearDownFails {
    pub fn test_passes(&self) {}

    fn tear_down(&mut self) -> Outcome {
        raise("socket already closed")
    }
}

/// A body that panics.
#[derive(Debug, Default)]
pub struct Panics {
    pub torn_down: bool,
}

#[test_entity]
impl Panics {
    pub fn test_panics(&mut self) {
        panic!("index out of range");
    }

    fn tear_down(&mut self) {
        self.torn_down = true;
    }
}

/// Set-up panics, so the body never runs.
#[derive(Debug, Default)]
pub struct SetUpPanics {
    pub log: Vec<&'static str>,
}

#[test_entity]
impl SetUpPanics {
    fn set_up(&mut self) {
        panic!("no database");
    }

    pub fn test_method(&mut self) {
        self.log.push("test_method");
    }

    fn tear_down(&mut self) {
        self.log.push("tear_down");
    }
}

/// A body that errors, then a tear-down that panics.
#[derive(Debug, Default)]
pub struct ErrorsThenTearDownPanics;

#[test_entity]
impl ErrorsThenTearDownPanics {
    pub fn test_errors(&self) -> Outcome {
        raise("body broke")
    }

    fn tear_down(&mut self) {
        panic!("tear_down exploded");
    }
}

/// A body that lets a harness error from a nested run escape.
#[derive(Debug, Default)]
pub struct DispatchesUnknown;

#[test_entity]
impl DispatchesUnknown {
    pub fn test_dispatches_unknown(&self, t: &TestContext<'_>) -> Outcome {
        let mut result = TestResult::new();
        TestCase::<WasRun>::new("test_missing", &mut result, t.sink()).run()?;
        Ok(())
    }
}

/// No test methods at all.
#[derive(Debug, Default)]
pub struct Empty;

#[test_entity]
impl Empty {
    pub fn describe(&self) -> &'static str {
        "an entity without tests"
    }
}
