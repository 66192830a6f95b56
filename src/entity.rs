//! Registration surface for test entities.
//!
//! A test entity bundles test methods with optional `set_up` / `tear_down` hooks. Entities are
//! usually declared with `#[test_entity]`, which builds the registration list from an inherent
//! impl block; implementing [`TestEntity`] by hand works the same way.

use std::fmt;

use crate::assertions::TestContext;
use crate::errors::Outcome;

/// Signature every registered test method is adapted to.
pub type TestFn<E> = fn(&mut E, &TestContext<'_>) -> Outcome;

/// One `(name, callable)` registration.
pub struct TestMethod<E> {
    name: &'static str,
    body: TestFn<E>,
}

impl<E> TestMethod<E> {
    pub const fn new(name: &'static str, body: TestFn<E>) -> Self {
        Self { name, body }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn invoke(&self, entity: &mut E, cx: &TestContext<'_>) -> Outcome {
        (self.body)(entity, cx)
    }
}

// Manual impls: `E` itself need not be `Clone` or `Debug`.
impl<E> Clone for TestMethod<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for TestMethod<E> {}

impl<E> fmt::Debug for TestMethod<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestMethod").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A type whose methods can be run as tests.
///
/// A fresh instance is built with `Default` for every test method, so fixture state never leaks
/// between tests.
pub trait TestEntity: Default {
    /// Display name, used in reports and harness errors.
    const NAME: &'static str;

    /// Methods introduced by this entity, in declaration order.
    fn methods() -> Vec<TestMethod<Self>>;

    /// Runs before every test method. No-op by default.
    fn set_up(&mut self, _cx: &TestContext<'_>) -> Outcome {
        Ok(())
    }

    /// Runs after every test method, whatever happened before. No-op by default.
    fn tear_down(&mut self, _cx: &TestContext<'_>) -> Outcome {
        Ok(())
    }
}
