//! Integration tests for runit through its public API and the `#[test_entity]` macro

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use runit::{
    DiagnosticSink, HarnessError, Outcome, Reporter, RunConfig, TestCase, TestContext, TestEntity, TestMethod,
    TestResult, TestSuite, Verdict, raise, selftest, test_entity,
};

// =============================================================================
// Entities
// =============================================================================

#[derive(Debug, Default)]
struct Inventory {
    items: Vec<&'static str>,
    log: Vec<&'static str>,
}

#[test_entity]
impl Inventory {
    fn set_up(&mut self) {
        self.log.push("set_up");
        self.items = vec!["bolt", "nut"];
    }

    pub fn test_starts_stocked(&mut self, t: &TestContext<'_>) -> Outcome {
        self.log.push("test_starts_stocked");
        t.assert_equal(self.items.len(), 2_usize, Some("set_up stocks two items"))?;
        Ok(())
    }

    pub fn test_reorders_when_empty(&mut self, t: &TestContext<'_>) -> Outcome {
        self.items.clear();
        t.assert(self.items.is_empty(), None)?;
        Ok(())
    }

    pub fn test_rejects_missing_part(&mut self) -> Outcome {
        self.lookup("washer").map(|_| ())
    }

    pub fn lookup(&self, part: &str) -> Result<&'static str, runit::Failure> {
        match self.items.iter().find(|item| **item == part) {
            Some(item) => Ok(*item),
            None => raise(format!("no such part: {part}")),
        }
    }

    fn tear_down(&mut self) {
        self.log.push("tear_down");
    }
}

/// Implemented by hand, without the macro.
#[derive(Debug, Default)]
struct Manual {
    calls: u32,
}

impl TestEntity for Manual {
    const NAME: &'static str = "Manual";

    fn methods() -> Vec<TestMethod<Self>> {
        vec![
            TestMethod::<Self>::new("test_counts_calls", |manual, cx| {
                manual.calls += 1;
                cx.assert_equal(manual.calls, 1_u32, None)?;
                Ok(())
            }),
            TestMethod::<Self>::new("check_not_discovered", |_, _| Ok(())),
        ]
    }
}

// =============================================================================
// Reporting
// =============================================================================

#[derive(Clone, Default)]
struct Recording(Rc<RefCell<Vec<String>>>);

impl Reporter for Recording {
    fn on_test_start(&mut self, entity: &str, method: &str) {
        self.0.borrow_mut().push(format!("start {entity}::{method}"));
    }

    fn on_test_complete(&mut self, entity: &str, method: &str, verdict: Verdict) {
        self.0.borrow_mut().push(format!("done {entity}::{method} {}", verdict.as_str()));
    }

    fn on_run_complete(&mut self, result: &TestResult) {
        self.0.borrow_mut().push(format!("complete {result}"));
    }
}

/// Log output captured from a scoped subscriber.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn quiet() -> TestSuite {
    TestSuite::new().with_sink(DiagnosticSink::buffer())
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_self_test_suite_succeeds() {
    let mut suite = selftest::suite().with_sink(DiagnosticSink::buffer());
    let result = suite.run().unwrap().clone();

    insta::assert_snapshot!(result.summary(), @"26 run, 0 failed");
    assert!(result.succeeded());
    assert!(suite.sink().lines().is_empty());
}

#[test]
fn test_passing_self_test_run_logs_nothing_at_warn() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let summary = tracing::subscriber::with_default(subscriber, || {
        let mut suite = selftest::suite().with_sink(DiagnosticSink::buffer());
        suite.run().unwrap().summary()
    });

    assert_eq!(summary, "26 run, 0 failed");
    let logged = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert_eq!(logged, "");
}

#[test]
fn test_self_test_suite_registers_entities_in_order() {
    assert_eq!(
        selftest::suite().entities(),
        vec!["TestCaseTest", "TestSuiteTest", "TestAssertionsTest"]
    );
}

#[test]
fn test_macro_registers_prefixed_public_methods_in_order() {
    let names: Vec<_> = Inventory::methods().iter().map(|m| m.name()).collect();
    assert_eq!(
        names,
        vec!["test_starts_stocked", "test_reorders_when_empty", "test_rejects_missing_part"]
    );
    assert_eq!(Inventory::NAME, "Inventory");
}

#[test]
fn test_case_runs_lifecycle_around_body() {
    let sink = DiagnosticSink::buffer();
    let mut result = TestResult::new();
    let mut case = TestCase::<Inventory>::new("test_starts_stocked", &mut result, &sink);

    assert_eq!(case.run().unwrap().summary(), "1 run, 0 failed");
    assert_eq!(case.entity().log, vec!["set_up", "test_starts_stocked", "tear_down"]);
}

#[test]
fn test_errors_are_reported_through_the_sink() {
    let mut suite = quiet();
    suite.register::<Inventory>();

    assert_eq!(suite.run().unwrap().summary(), "3 run, 0 failed, 1 error");
    assert_eq!(
        suite.sink().lines(),
        vec!["test_rejects_missing_part: no such part: washer [ERROR]"]
    );
}

#[test]
fn test_each_case_gets_a_fresh_entity() {
    let mut suite = quiet();
    suite.register::<Manual>().register::<Manual>();
    assert_eq!(suite.run().unwrap().summary(), "2 run, 0 failed");
}

#[test]
fn test_hand_written_entity_discovers_only_prefixed_methods() {
    let mut suite = quiet();
    suite.register::<Manual>();
    assert_eq!(suite.test_names(), vec!["Manual::test_counts_calls"]);
}

#[test]
fn test_reporter_sees_every_test_in_order() {
    let recording = Recording::default();
    let mut suite = quiet().with_reporter(Box::new(recording.clone()));
    suite.register::<Manual>().register::<Inventory>();
    suite.run().unwrap();

    assert_eq!(
        *recording.0.borrow(),
        vec![
            "start Manual::test_counts_calls",
            "done Manual::test_counts_calls ok",
            "start Inventory::test_starts_stocked",
            "done Inventory::test_starts_stocked ok",
            "start Inventory::test_reorders_when_empty",
            "done Inventory::test_reorders_when_empty ok",
            "start Inventory::test_rejects_missing_part",
            "done Inventory::test_rejects_missing_part ERROR",
            "complete 4 run, 0 failed, 1 error",
        ]
    );
}

#[test]
fn test_filter_limits_what_runs() {
    let mut suite = quiet().with_config(RunConfig::new().with_filter(Some("stocked".into())));
    suite.register::<Inventory>().register::<Manual>();
    assert_eq!(suite.run().unwrap().summary(), "1 run, 0 failed");
}

#[test]
fn test_unknown_test_name_escapes_as_diagnostic() {
    let sink = DiagnosticSink::buffer();
    let mut result = TestResult::new();
    let err = TestCase::<Manual>::new("test_nope", &mut result, &sink)
        .run()
        .map(|_| ())
        .unwrap_err();

    assert!(matches!(err, HarnessError::UnknownTest { entity: "Manual", .. }));
    let code = miette::Diagnostic::code(&err).map(|code| code.to_string());
    assert_eq!(code.as_deref(), Some("runit::unknown_test"));
    assert_eq!(result.summary(), "1 run, 0 failed");
}
