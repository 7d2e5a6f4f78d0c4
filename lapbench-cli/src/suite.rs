//! Suite definition: the shared environment, its teardown, and the tests

use lapbench_core::{
    BoxError, LapCount, OperationError, RegistryError, RunObserver, RunResult, TestDefinition,
    TestRegistry, TrialRunner,
};
use lapbench_report::{BaselineReference, SuiteInfo};

type TeardownFn<E> = Box<dyn FnMut(&mut E) -> Result<(), BoxError>>;

/// A benchmark suite ready to hand to [`run`](crate::run).
///
/// Every test in the suite shares one environment `E`. The teardown runs
/// after every lap of every test and must bring the environment back to a
/// blank state.
pub struct Suite<E> {
    title: String,
    version: String,
    environment: E,
    teardown: TeardownFn<E>,
    registry: TestRegistry<E>,
    baselines: Vec<BaselineReference>,
}

impl<E: 'static> Suite<E> {
    /// Create an empty suite whose teardown does nothing
    pub fn new(title: impl Into<String>, environment: E) -> Self {
        Self {
            title: title.into(),
            version: String::new(),
            environment,
            teardown: Box::new(|_| Ok(())),
            registry: TestRegistry::new(),
            baselines: Vec::new(),
        }
    }

    /// Set the suite version shown next to the title
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the per-lap teardown
    pub fn with_teardown<T>(mut self, teardown: T) -> Self
    where
        T: FnMut(&mut E) -> Result<(), BoxError> + 'static,
    {
        self.teardown = Box::new(teardown);
        self
    }

    /// Set the reference scores the result is charted against
    pub fn with_baselines(mut self, baselines: Vec<BaselineReference>) -> Self {
        self.baselines = baselines;
        self
    }

    /// Register a test built from a setup and a main operation
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
    {
        self.registry.register(name, description, setup, main)
    }

    /// Register a prebuilt test
    pub fn insert(&mut self, test: TestDefinition<E>) -> Result<(), RegistryError> {
        self.registry.insert(test)
    }
}

impl<E> Suite<E> {
    /// Registered tests
    pub fn registry(&self) -> &TestRegistry<E> {
        &self.registry
    }

    /// Registered tests, mutably (used to apply filters)
    pub fn registry_mut(&mut self) -> &mut TestRegistry<E> {
        &mut self.registry
    }

    /// Shared environment
    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// Reference scores
    pub fn baselines(&self) -> &[BaselineReference] {
        &self.baselines
    }

    /// Title and version for reports
    pub fn info(&self) -> SuiteInfo {
        SuiteInfo {
            title: self.title.clone(),
            version: self.version.clone(),
        }
    }

    /// Run every registered test through `runner`
    pub fn run_observed(
        &mut self,
        runner: &TrialRunner,
        laps: LapCount,
        observer: &mut dyn RunObserver,
    ) -> Result<Vec<RunResult>, OperationError> {
        runner.run_all_observed(
            &self.registry,
            &mut self.environment,
            laps,
            &mut self.teardown,
            observer,
        )
    }
}

impl<E> std::fmt::Debug for Suite<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suite")
            .field("title", &self.title)
            .field("version", &self.version)
            .field("tests", &self.registry.names().collect::<Vec<_>>())
            .field("baselines", &self.baselines.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teardown_runs_after_every_lap() {
        let mut suite = Suite::new("count", Vec::<u32>::new())
            .with_version("2")
            .with_teardown(|env: &mut Vec<u32>| {
                env.clear();
                Ok(())
            });
        suite
            .register(
                "push",
                "",
                |env: &mut Vec<u32>| {
                    assert!(env.is_empty(), "teardown did not wipe the environment");
                    env.push(1);
                    Ok(())
                },
                |env, ()| {
                    env.push(2);
                    Ok(())
                },
            )
            .unwrap();

        let laps = LapCount::new(3).unwrap();
        let results = suite
            .run_observed(&TrialRunner::monotonic(), laps, &mut ())
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].laps, 3);
        assert!(suite.environment().is_empty());
        assert_eq!(suite.info().title, "count");
        assert_eq!(suite.info().version, "2");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut suite = Suite::new("dup", ());
        suite
            .insert(TestDefinition::without_setup("a", "", |_| Ok(())))
            .unwrap();
        let err = suite
            .insert(TestDefinition::without_setup("a", "", |_| Ok(())))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(name) if name == "a"));
        assert_eq!(suite.registry().len(), 1);
    }
}
