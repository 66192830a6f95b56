//! Assertion helpers handed to every lifecycle hook and test body.
//!
//! A failed assertion writes one line to the diagnostic sink and returns an [`AssertionFailure`],
//! which test code propagates with `?`.

use std::fmt::Debug;

use crate::errors::AssertionFailure;
use crate::sink::DiagnosticSink;

/// Per-test view of the harness: the running method's name plus the shared diagnostic sink.
#[derive(Debug, Clone, Copy)]
pub struct TestContext<'a> {
    method: &'a str,
    sink: &'a DiagnosticSink,
}

impl<'a> TestContext<'a> {
    pub fn new(method: &'a str, sink: &'a DiagnosticSink) -> Self {
        Self { method, sink }
    }

    /// Name of the test method being run.
    pub fn method(&self) -> &'a str {
        self.method
    }

    /// The shared diagnostic sink.
    pub fn sink(&self) -> &'a DiagnosticSink {
        self.sink
    }

    /// Fail unless `condition` holds.
    ///
    /// The failure message reads `<method>: <explanation> [FAIL]`; a missing explanation renders
    /// as an empty string.
    pub fn assert(&self, condition: bool, explanation: Option<&str>) -> Result<(), AssertionFailure> {
        if condition {
            return Ok(());
        }

        let message = format!("{}: {} [FAIL]", self.method, explanation.unwrap_or_default());
        tracing::debug!(method = self.method, %message, "assertion failed");
        self.sink.write_line(message.as_str());
        Err(AssertionFailure::new(message))
    }

    /// Fail unless `actual == expected`.
    ///
    /// The explanation becomes `<actual> should have equaled <expected>[: <explanation>]`, with
    /// both values in their `Debug` form.
    pub fn assert_equal<A, E>(&self, actual: A, expected: E, explanation: Option<&str>) -> Result<(), AssertionFailure>
    where
        A: PartialEq<E> + Debug,
        E: Debug,
    {
        if actual == expected {
            return Ok(());
        }

        let mut message = format!("{actual:?} should have equaled {expected:?}");
        if let Some(explanation) = explanation {
            message.push_str(": ");
            message.push_str(explanation);
        }
        self.assert(false, Some(message.as_str()))
    }

    /// Fail unconditionally.
    pub fn fail(&self, explanation: &str) -> Result<(), AssertionFailure> {
        self.assert(false, Some(explanation))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_true_is_silent() {
        let sink = DiagnosticSink::buffer();
        let cx = TestContext::new("test_assert_truthiness", &sink);
        assert!(cx.assert(true, Some("never shown")).is_ok());
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_message_on_fail() {
        let sink = DiagnosticSink::buffer();
        let cx = TestContext::new("test_message_on_fail", &sink);
        let failure = cx.assert(false, Some("falsy")).unwrap_err();
        assert_eq!(failure.message(), "test_message_on_fail: falsy [FAIL]");
        assert_eq!(sink.lines(), vec!["test_message_on_fail: falsy [FAIL]"]);
    }

    #[test]
    fn test_missing_explanation_renders_empty() {
        let sink = DiagnosticSink::buffer();
        let cx = TestContext::new("test_assert_falsiness", &sink);
        let failure = cx.assert(false, None).unwrap_err();
        assert_eq!(failure.message(), "test_assert_falsiness:  [FAIL]");
    }

    #[test]
    fn test_message_on_inequality() {
        let sink = DiagnosticSink::buffer();
        let cx = TestContext::new("test_message_on_inequality", &sink);
        let failure = cx.assert_equal(1, 0, Some("equality")).unwrap_err();
        assert_eq!(
            failure.message(),
            "test_message_on_inequality: 1 should have equaled 0: equality [FAIL]"
        );
    }

    #[test]
    fn test_inequality_without_explanation() {
        let sink = DiagnosticSink::buffer();
        let cx = TestContext::new("test_x", &sink);
        let failure = cx.assert_equal("a", "b", None).unwrap_err();
        assert_eq!(failure.message(), r#"test_x: "a" should have equaled "b" [FAIL]"#);
    }

    #[test]
    fn test_equality_passes_across_types() {
        let sink = DiagnosticSink::buffer();
        let cx = TestContext::new("test_x", &sink);
        assert!(cx.assert_equal("1 run, 0 failed", String::from("1 run, 0 failed"), None).is_ok());
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_each_failure_writes_one_line() {
        let sink = DiagnosticSink::buffer();
        let cx = TestContext::new("test_x", &sink);
        let _ = cx.assert_equal(1, 2, None);
        let _ = cx.fail("explicit");
        assert_eq!(sink.lines().len(), 2);
        assert_eq!(sink.last_line().as_deref(), Some("test_x: explicit [FAIL]"));
    }
}
