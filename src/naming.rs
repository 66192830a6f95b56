//! Test-method naming convention.

use crate::entity::{TestEntity, TestMethod};

/// Prefix that marks a method as a test. Case-sensitive and anchored at the start of the name.
pub const TEST_PREFIX: &str = "test";

/// Whether `name` follows the test-method naming convention.
pub fn is_test_method(name: &str) -> bool {
    name.starts_with(TEST_PREFIX)
}

/// The test methods of `E`, in declaration order.
///
/// Only the entity's own registration list is consulted, so lifecycle plumbing (`set_up`,
/// `tear_down`) and helpers never show up here.
pub fn discover<E: TestEntity>() -> Vec<TestMethod<E>> {
    E::methods()
        .into_iter()
        .filter(|method| is_test_method(method.name()))
        .collect()
}
