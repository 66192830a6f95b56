//! Failure taxonomy for test runs.
//!
//! Three kinds of failure can interrupt a test:
//! - [`AssertionFailure`]: a check did not hold. Counted as "failed".
//! - [`Failure::Error`] / [`Failure::Panic`]: an unanticipated defect in the code under test.
//!   Counted as "errored".
//! - [`HarnessError`]: a defect in the harness itself. Never counted; it escapes `run()` and aborts
//!   the suite.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// A failed check raised by the assertion helpers on [`crate::TestContext`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
}

impl AssertionFailure {
    pub(crate) fn new(message: String) -> Self {
        Self { message }
    }

    /// The full rendered message, e.g. `test_x: falsy [FAIL]`.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Lifecycle phase a failure was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SetUp,
    Body,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::SetUp => write!(f, "set_up"),
            Phase::Body => write!(f, "body"),
        }
    }
}

/// Anything a lifecycle hook or test body can return instead of `Ok(())`.
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    #[error("{0}")]
    Error(Box<dyn std::error::Error + Send + Sync>),

    #[error("panicked: {0}")]
    Panic(String),

    /// A harness error surfacing through test code, e.g. from a nested `TestCase::run`.
    #[error(transparent)]
    Harness(#[from] HarnessError),
}

impl Failure {
    /// An error with a plain message.
    pub fn error(message: impl Into<String>) -> Self {
        Failure::Error(message.into().into())
    }

    /// Wrap any error type raised by the code under test.
    pub fn from_error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Failure::Error(Box::new(err))
    }
}

/// What lifecycle hooks and test bodies return.
pub type Outcome = Result<(), Failure>;

/// Raise a plain error from test code.
pub fn raise<T>(message: impl Into<String>) -> Result<T, Failure> {
    Err(Failure::error(message))
}

/// A defect in the harness itself. Escapes `TestCase::run` and aborts the suite.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("no test method `{method}` is registered on `{entity}`")]
    #[diagnostic(
        code(runit::unknown_test),
        help("test methods are dispatched through `TestEntity::methods()`; check the name the case was built with")
    )]
    UnknownTest { entity: &'static str, method: String },

    #[error("tear_down failed after `{entity}::{method}`: {message}")]
    #[diagnostic(
        code(runit::tear_down),
        help("tear_down is not protected by the harness; it must not fail")
    )]
    TearDown {
        entity: &'static str,
        method: String,
        message: String,
    },
}
