#![forbid(unsafe_code)]
//! runit: a minimal xUnit-style test harness that tests itself.
//!
//! An entity type groups test methods with optional `set_up` / `tear_down` hooks. Each test runs
//! as a [`TestCase`] on a fresh entity; a [`TestSuite`] runs the tests of every registered entity
//! against one shared [`TestResult`].
//!
//! ## Outcomes
//!
//! - **Passed**: set-up and body returned `Ok`
//! - **Failed**: an assertion failed in set-up or the body
//! - **Errored**: any other error or a panic in set-up or the body
//! - **Harness-fatal**: the harness itself failed (unknown test name, failing tear-down); this is
//!   returned as `Err(HarnessError)` and never counted
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` with `?`. The crate enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` is acceptable in tests.
//!
//! ## Example
//! ```ignore
//! use runit::{Outcome, TestContext, TestSuite, test_entity};
//!
//! #[derive(Default)]
//! struct Arithmetic;
//!
//! #[test_entity]
//! impl Arithmetic {
//!     pub fn test_addition(&mut self, t: &TestContext<'_>) -> Outcome {
//!         t.assert_equal(1 + 1, 2, None)?;
//!         Ok(())
//!     }
//! }
//!
//! let mut suite = TestSuite::new();
//! suite.register::<Arithmetic>();
//! println!("{}", suite.run()?.summary());
//! ```
#![deny(clippy::unwrap_used)]

extern crate self as runit;

pub mod assertions;
pub mod case;
pub mod cli;
pub mod config;
pub mod entity;
pub mod errors;
pub mod naming;
pub mod report;
pub mod result;
pub mod selftest;
pub mod sink;
pub mod suite;
pub mod version;

pub use assertions::TestContext;
pub use case::{TestCase, Verdict};
pub use config::RunConfig;
pub use entity::{TestEntity, TestFn, TestMethod};
pub use errors::{AssertionFailure, Failure, HarnessError, Outcome, Phase, raise};
pub use report::{ConsoleReporter, Reporter, SilentReporter};
pub use result::TestResult;
pub use sink::DiagnosticSink;
pub use suite::TestSuite;

pub use runit_derive::test_entity;
