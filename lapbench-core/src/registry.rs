//! Test Registry
//!
//! Holds the named tests of a suite in registration order. A test pairs an
//! untimed `setup` with a timed `main`; whatever `setup` returns is moved
//! into `main`, so per-lap scratch state never lives on the definition.

use crate::measure::Timer;
use crate::runner::{BoxError, LapFailure, Phase, invoke};
use std::fmt;
use thiserror::Error;

/// Errors raised while building a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A test with this name is already registered
    #[error("test '{0}' is already registered")]
    Duplicate(String),
}

type LapFn<E> = Box<dyn Fn(&mut E, &mut Timer) -> Result<(), LapFailure>>;

/// A named, immutable test: untimed setup plus timed main operation
pub struct TestDefinition<E> {
    name: String,
    description: String,
    lap: LapFn<E>,
}

impl<E> TestDefinition<E> {
    /// Build a test from a setup and a main operation.
    ///
    /// `setup` must establish everything `main` needs, since the suite's
    /// teardown wipes the environment after every lap.
    pub fn new<S, Setup, Main>(
        name: impl Into<String>,
        description: impl Into<String>,
        setup: Setup,
        main: Main,
    ) -> Self
    where
        Setup: Fn(&mut E) -> Result<S, BoxError> + 'static,
        Main: Fn(&mut E, S) -> Result<(), BoxError> + 'static,
        E: 'static,
    {
        let lap: LapFn<E> = Box::new(move |env: &mut E, timer: &mut Timer| {
            let scratch = invoke(Phase::Setup, || setup(env))?;
            timer.start();
            let outcome = invoke(Phase::Main, || main(env, scratch));
            timer.stop();
            outcome
        });

        Self {
            name: name.into(),
            description: description.into(),
            lap,
        }
    }

    /// Build a test that needs no setup
    pub fn without_setup<Main>(
        name: impl Into<String>,
        description: impl Into<String>,
        main: Main,
    ) -> Self
    where
        Main: Fn(&mut E) -> Result<(), BoxError> + 'static,
        E: 'static,
    {
        Self::new(name, description, |_| Ok(()), move |env, ()| main(env))
    }

    /// Unique test name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description of what the test measures
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Run one lap: setup, then `main` between `timer.start()` and `timer.stop()`
    pub(crate) fn run_lap(&self, env: &mut E, timer: &mut Timer) -> Result<(), LapFailure> {
        (self.lap)(env, timer)
    }
}

impl<E> fmt::Debug for TestDefinition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of uniquely named tests
pub struct TestRegistry<E> {
    tests: Vec<TestDefinition<E>>,
}

impl<E> TestRegistry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tests: Vec::new() }
    }

    /// Register a test built from its parts
    pub fn register<S, Setup, Main>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        setup: Setup,
        main: Main,
    ) -> Result<(), RegistryError>
    where
        Setup: Fn(&mut E) -> Result<S, BoxError> + 'static,
        Main: Fn(&mut E, S) -> Result<(), BoxError> + 'static,
        E: 'static,
    {
        self.insert(TestDefinition::new(name, description, setup, main))
    }

    /// Register an already built definition, rejecting duplicate names
    pub fn insert(&mut self, test: TestDefinition<E>) -> Result<(), RegistryError> {
        if self.get(test.name()).is_some() {
            return Err(RegistryError::Duplicate(test.name));
        }
        self.tests.push(test);
        Ok(())
    }

    /// Look up a test by name
    pub fn get(&self, name: &str) -> Option<&TestDefinition<E>> {
        self.tests.iter().find(|t| t.name == name)
    }

    /// Tests in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, TestDefinition<E>> {
        self.tests.iter()
    }

    /// Test names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(|t| t.name.as_str())
    }

    /// Number of registered tests
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Whether no tests are registered
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Keep only tests matching `keep`, preserving their order
    pub fn retain(&mut self, mut keep: impl FnMut(&TestDefinition<E>) -> bool) {
        self.tests.retain(|t| keep(t));
    }
}

impl<E> Default for TestRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for TestRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tests.iter()).finish()
    }
}

impl<'a, E> IntoIterator for &'a TestRegistry<E> {
    type Item = &'a TestDefinition<E>;
    type IntoIter = std::slice::Iter<'a, TestDefinition<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tests.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ()) -> Result<(), BoxError> {
        Ok(())
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = TestRegistry::<()>::new();
        for name in ["tableCreation", "tableCloning", "classChange"] {
            registry
                .insert(TestDefinition::without_setup(name, "", noop))
                .unwrap();
        }

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["tableCreation", "tableCloning", "classChange"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = TestRegistry::<()>::new();
        registry
            .register("a", "first", |_| Ok(()), |_, ()| Ok(()))
            .unwrap();

        let err = registry
            .register("a", "second", |_| Ok(()), |_, ()| Ok(()))
            .unwrap_err();

        assert_eq!(err, RegistryError::Duplicate("a".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().description(), "first");
    }

    #[test]
    fn test_retain_keeps_order() {
        let mut registry = TestRegistry::<()>::new();
        for name in ["c", "a", "b", "d"] {
            registry
                .insert(TestDefinition::without_setup(name, "", noop))
                .unwrap();
        }

        registry.retain(|t| t.name() != "a");

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["c", "b", "d"]);
    }

    #[test]
    fn test_setup_output_reaches_main() {
        let mut registry = TestRegistry::<Vec<u32>>::new();
        registry
            .register(
                "push",
                "",
                |env: &mut Vec<u32>| Ok(env.len() as u32 + 40),
                |env, seed| {
                    env.push(seed + 2);
                    Ok(())
                },
            )
            .unwrap();

        let mut env = Vec::new();
        let mut timer = Timer::monotonic();
        registry
            .get("push")
            .unwrap()
            .run_lap(&mut env, &mut timer)
            .unwrap();

        assert_eq!(env, [42]);
        assert!(timer.elapsed().is_some());
    }

    #[test]
    fn test_empty_registry() {
        let registry = TestRegistry::<()>::default();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
