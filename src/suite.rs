//! Test suite: registered entities driven against one shared result.

use std::fmt;
use std::ops::ControlFlow;

use crate::case::{TestCase, Verdict};
use crate::config::RunConfig;
use crate::entity::TestEntity;
use crate::errors::HarnessError;
use crate::naming;
use crate::report::{Reporter, SilentReporter};
use crate::result::TestResult;
use crate::sink::DiagnosticSink;

/// Borrowed state threaded through one suite run.
struct SuiteRun<'s> {
    result: &'s mut TestResult,
    sink: &'s DiagnosticSink,
    config: &'s RunConfig,
    reporter: &'s mut dyn Reporter,
}

/// Type-erased entity descriptor, monomorphized at registration.
struct Registration {
    entity: &'static str,
    tests: fn() -> Vec<&'static str>,
    run: fn(&mut SuiteRun<'_>) -> Result<ControlFlow<()>, HarnessError>,
}

/// An ordered list of entities plus the result every spawned case shares.
pub struct TestSuite {
    registrations: Vec<Registration>,
    result: TestResult,
    sink: DiagnosticSink,
    config: RunConfig,
    reporter: Box<dyn Reporter>,
}

impl TestSuite {
    /// Empty suite reporting nothing and writing diagnostics to stderr.
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            result: TestResult::new(),
            sink: DiagnosticSink::stderr(),
            config: RunConfig::default(),
            reporter: Box::new(SilentReporter),
        }
    }

    pub fn with_sink(mut self, sink: DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Append `E` to the registration order.
    pub fn register<E: TestEntity>(&mut self) -> &mut Self {
        tracing::debug!(entity = E::NAME, "registered");
        self.registrations.push(Registration {
            entity: E::NAME,
            tests: test_names::<E>,
            run: run_entity::<E>,
        });
        self
    }

    /// Registered entity names, in registration order.
    pub fn entities(&self) -> Vec<&'static str> {
        self.registrations.iter().map(|r| r.entity).collect()
    }

    /// Every `Entity::method` the suite would run under its config, in run order.
    pub fn test_names(&self) -> Vec<String> {
        self.registrations
            .iter()
            .flat_map(|r| (r.tests)().into_iter().map(move |method| (r.entity, method)))
            .filter(|(entity, method)| self.config.selects(entity, method))
            .map(|(entity, method)| format!("{entity}::{method}"))
            .collect()
    }

    pub fn result(&self) -> &TestResult {
        &self.result
    }

    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Run every discovered test of every registered entity, in order.
    ///
    /// ## Errors
    ///
    /// A [`HarnessError`] from any case aborts the run immediately; tests after it never start.
    #[tracing::instrument(skip_all, fields(entities = self.registrations.len()))]
    pub fn run(&mut self) -> Result<&TestResult, HarnessError> {
        let mut run = SuiteRun {
            result: &mut self.result,
            sink: &self.sink,
            config: &self.config,
            reporter: self.reporter.as_mut(),
        };

        for registration in &self.registrations {
            match (registration.run)(&mut run) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => {
                    tracing::debug!(entity = registration.entity, "stopping at first failure");
                    break;
                }
                Err(fatal) => {
                    tracing::debug!(entity = registration.entity, error = %fatal, "suite aborted");
                    return Err(fatal);
                }
            }
        }

        self.reporter.on_run_complete(&self.result);
        tracing::debug!(summary = %self.result, "suite finished");
        Ok(&self.result)
    }
}

impl Default for TestSuite {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TestSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSuite")
            .field("entities", &self.entities())
            .field("result", &self.result)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn test_names<E: TestEntity>() -> Vec<&'static str> {
    naming::discover::<E>().iter().map(|m| m.name()).collect()
}

fn run_entity<E: TestEntity>(run: &mut SuiteRun<'_>) -> Result<ControlFlow<()>, HarnessError> {
    for method in naming::discover::<E>() {
        if !run.config.selects(E::NAME, method.name()) {
            continue;
        }

        run.reporter.on_test_start(E::NAME, method.name());
        let verdict = TestCase::<E>::new(method.name(), &mut *run.result, run.sink).execute()?;
        run.reporter.on_test_complete(E::NAME, method.name(), verdict);

        if run.config.stop_on_fail && verdict != Verdict::Passed {
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}
