#![allow(dead_code)]

use testrig::config::{ExternalDependency, Externals, TestRunConfig};

/// Builder for `TestRunConfig` to simplify test setup.
#[derive(Default)]
pub struct TestRunConfigBuilder {
    config: TestRunConfig,
}

impl TestRunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_unit(mut self) -> Self {
        self.config.node_unit = true;
        self
    }

    pub fn remote_unit(mut self) -> Self {
        self.config.remote_unit = true;
        self
    }

    pub fn remote_functional(mut self) -> Self {
        self.config.remote_functional = true;
        self
    }

    pub fn watch(mut self) -> Self {
        self.config.watch = true;
        self
    }

    pub fn verbose(mut self) -> Self {
        self.config.verbose = true;
        self
    }

    pub fn child_config(mut self, name: &str) -> Self {
        self.config.child_config = Some(name.to_string());
        self
    }

    pub fn intern_config(mut self, file: &str) -> Self {
        self.config.intern_config = Some(file.to_string());
        self
    }

    pub fn reporters(mut self, list: &str) -> Self {
        self.config.reporters = Some(list.to_string());
        self
    }

    pub fn user_name(mut self, name: &str) -> Self {
        self.config.user_name = Some(name.to_string());
        self
    }

    pub fn testing_key(mut self, key: &str) -> Self {
        self.config.testing_key = Some(key.to_string());
        self
    }

    pub fn filter(mut self, pattern: &str) -> Self {
        self.config.filter = Some(pattern.to_string());
        self
    }

    /// Add a bare-name external dependency, creating `externals` if needed.
    pub fn external(mut self, name: &str) -> Self {
        self.config
            .externals
            .get_or_insert_with(Externals::default)
            .dependencies
            .push(ExternalDependency::Name(name.to_string()));
        self
    }

    pub fn externals(mut self, externals: Externals) -> Self {
        self.config.externals = Some(externals);
        self
    }

    pub fn build(self) -> TestRunConfig {
        self.config
    }
}
