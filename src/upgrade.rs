//! Module upgrade execution
//!
//! Runs `go get <module>` for each selected module, in selection order,
//! through the injected executor. Fail-fast: the first failing upgrade
//! aborts the remainder of the batch.

use crate::domain::ModuleUpdate;
use crate::error::{AppError, ExecutionError};
use crate::executor::CommandExecutor;

/// Applies selected upgrades via the Go toolchain
pub struct Upgrader<E> {
    executor: E,
    go_bin: String,
}

impl<E: CommandExecutor> Upgrader<E> {
    /// Creates an upgrader that invokes the default `go` binary
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            go_bin: "go".to_string(),
        }
    }

    /// Overrides the `go` binary path (builder pattern)
    pub fn with_go_bin(mut self, go_bin: impl Into<String>) -> Self {
        self.go_bin = go_bin.into();
        self
    }

    /// The command line that would be run for one module
    pub fn command_for(&self, module: &ModuleUpdate) -> String {
        format!("{} get {}", self.go_bin, module.name)
    }

    /// Upgrades one module
    pub fn upgrade(&self, module: &ModuleUpdate) -> Result<(), ExecutionError> {
        self.executor
            .run(&self.go_bin, &["get", &module.name])
            .map(|_| ())
    }

    /// Upgrades each module in order, stopping at the first failure.
    ///
    /// `on_upgraded` runs after each successful upgrade so callers can
    /// report progress per module.
    pub fn upgrade_all<F>(&self, modules: &[ModuleUpdate], mut on_upgraded: F) -> Result<(), AppError>
    where
        F: FnMut(&ModuleUpdate),
    {
        for module in modules {
            self.upgrade(module)?;
            on_upgraded(module);
        }
        Ok(())
    }
}
