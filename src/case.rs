//! Execution and classification of a single test.
//!
//! ## Protocol
//!
//! 1. Count the start (even if set-up then fails).
//! 2. Run `set_up`.
//! 3. If set-up succeeded, dispatch the test method by name and run it.
//! 4. Classify what 2–3 raised: assertion → failed, other error or panic → errored, harness
//!    error → returned as `Err` with no counter change.
//! 5. Run `tear_down` exactly once, however 2–3 ended. The verdict is already counted, so a
//!    failing or panicking tear-down cannot lose it.
//!
//! ## Provenance
//!
//! Set-up and the body each run inside their own guarded call, so every failure is tagged with
//! the [`Phase`] that raised it. Only tagged failures are attributed to code under test; failures
//! from dispatch or tear-down are the harness's own and always escape. Tear-down is not guarded:
//! a tear-down error becomes [`HarnessError::TearDown`] and a tear-down panic unwinds out of
//! [`TestCase::run`] untouched.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::assertions::TestContext;
use crate::entity::TestEntity;
use crate::errors::{Failure, HarnessError, Outcome, Phase};
use crate::result::TestResult;
use crate::sink::DiagnosticSink;

/// Terminal classification of one test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
    Errored,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Passed => "ok",
            Verdict::Failed => "FAILED",
            Verdict::Errored => "ERROR",
        }
    }
}

/// What interrupted set-up or the body.
#[derive(Debug)]
enum Raised {
    /// Raised by code under test, tagged with its phase.
    UnderTest(Phase, Failure),
    /// Raised by the harness's own machinery.
    Harness(HarnessError),
}

/// One test method bound to a fresh entity, a shared result and a shared sink.
pub struct TestCase<'r, E: TestEntity> {
    method: String,
    entity: E,
    result: &'r mut TestResult,
    sink: &'r DiagnosticSink,
}

impl<'r, E: TestEntity> TestCase<'r, E> {
    /// Bind `method` on a default-constructed `E`.
    pub fn new(method: impl Into<String>, result: &'r mut TestResult, sink: &'r DiagnosticSink) -> Self {
        Self::with_entity(E::default(), method, result, sink)
    }

    /// Bind `method` on an already constructed entity.
    pub fn with_entity(
        entity: E,
        method: impl Into<String>,
        result: &'r mut TestResult,
        sink: &'r DiagnosticSink,
    ) -> Self {
        Self {
            method: method.into(),
            entity,
            result,
            sink,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The entity instance, for inspecting fixture state after a run.
    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn into_entity(self) -> E {
        self.entity
    }

    /// Run the test and return the shared result.
    ///
    /// ## Errors
    ///
    /// Returns a [`HarnessError`] when the harness itself fails: the method name is not
    /// registered, a harness error surfaced through test code, or tear-down failed. Counters are
    /// left as they were apart from the start.
    pub fn run(&mut self) -> Result<&TestResult, HarnessError> {
        self.execute()?;
        Ok(&*self.result)
    }

    /// Run the test and return its verdict.
    #[tracing::instrument(skip_all, fields(entity = E::NAME, method = %self.method))]
    pub fn execute(&mut self) -> Result<Verdict, HarnessError> {
        self.result.test_started();

        let cx = TestContext::new(&self.method, self.sink);
        let entity = &mut self.entity;

        let raised = match guarded(Phase::SetUp, || entity.set_up(&cx)) {
            Err(raised) => Some(raised),
            Ok(()) => match E::methods().into_iter().find(|m| m.name() == cx.method()) {
                Some(test) => guarded(Phase::Body, || test.invoke(entity, &cx)).err(),
                None => Some(Raised::Harness(HarnessError::UnknownTest {
                    entity: E::NAME,
                    method: cx.method().to_string(),
                })),
            },
        };

        let verdict = classify(raised, cx.method(), &mut *self.result, self.sink);

        tracing::debug!("tear_down");
        let torn_down = entity
            .tear_down(&cx)
            .map_err(|failure| tear_down_error::<E>(cx.method(), failure));

        match (verdict, torn_down) {
            (Ok(verdict), Ok(())) => Ok(verdict),
            (Ok(_), Err(fatal)) => {
                tracing::debug!(error = %fatal, "tear_down failed");
                Err(fatal)
            }
            (Err(fatal), torn_down) => {
                if let Err(also) = torn_down {
                    tracing::warn!(error = %also, "tear_down failed after a harness error");
                }
                Err(fatal)
            }
        }
    }
}

/// Count what set-up or the body raised. Runs before tear-down, so the verdict is recorded even
/// when tear-down then fails or panics.
fn classify(
    raised: Option<Raised>,
    method: &str,
    result: &mut TestResult,
    sink: &DiagnosticSink,
) -> Result<Verdict, HarnessError> {
    let verdict = match raised {
        None => Verdict::Passed,
        Some(Raised::UnderTest(phase, Failure::Assertion(failure))) => {
            tracing::debug!(%phase, %failure, "assertion failed");
            result.test_failed();
            Verdict::Failed
        }
        Some(Raised::UnderTest(_, Failure::Harness(fatal))) | Some(Raised::Harness(fatal)) => {
            tracing::debug!(error = %fatal, "harness error escaped the test");
            return Err(fatal);
        }
        Some(Raised::UnderTest(phase, failure)) => {
            tracing::debug!(%phase, %failure, "test errored");
            result.test_errored();
            sink.write_line(format!("{method}: {failure} [ERROR]"));
            Verdict::Errored
        }
    };
    tracing::debug!(verdict = verdict.as_str(), "classified");
    Ok(verdict)
}

/// Run one phase, catching both returned failures and panics.
///
/// A caught panic still passes through the process panic hook first, so its default report
/// reaches stderr alongside the `[ERROR]` line. The hook is process-wide and left alone here.
fn guarded(phase: Phase, call: impl FnOnce() -> Outcome) -> Result<(), Raised> {
    tracing::debug!(%phase, "enter");
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(failure)) => Err(Raised::UnderTest(phase, failure)),
        Err(payload) => Err(Raised::UnderTest(phase, Failure::Panic(panic_message(&*payload)))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

fn tear_down_error<E: TestEntity>(method: &str, failure: Failure) -> HarnessError {
    match failure {
        Failure::Harness(fatal) => fatal,
        other => HarnessError::TearDown {
            entity: E::NAME,
            method: method.to_string(),
            message: other.to_string(),
        },
    }
}
