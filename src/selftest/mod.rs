//! The harness's own test suite, written with the harness.
//!
//! - `fixtures` - entities the self-tests run as nested cases
//! - `case_test`, `suite_test`, `assertions_test` - the self-tests
//!
//! The `runit` binary runs [`suite`].

pub mod fixtures;


pub use assertions_test::TestAssertionsTest;
pub use case_test::TestCaseTest;
pub use suite_test::TestSuiteTest;

use crate::suite::TestSuite;

/// Suite of every self-test entity, in registration order.
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new();
    suite
        .register::<TestCaseTest>()
        .register::<TestSuiteTest>()
        .register::<TestAssertionsTest>();
    suite
}
