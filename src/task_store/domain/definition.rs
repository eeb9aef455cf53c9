//! Immutable task definition payload.
//!
//! A definition describes how a cell runs the task: the command, its
//! environment, and resource requirements. The store never interprets these
//! fields; they round-trip through the definition codec as opaque bytes.

use serde::{Deserialize, Serialize};

/// Immutable payload describing how to run a task on a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    root_fs: String,
    path: String,
    args: Vec<String>,
    environment: Vec<EnvironmentVariable>,
    resources: ResourceRequirements,
}

impl TaskDefinition {
    /// Creates a definition running `path` on the given root filesystem.
    #[must_use]
    pub fn new(root_fs: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            root_fs: root_fs.into(),
            path: path.into(),
            args: Vec::new(),
            environment: Vec::new(),
            resources: ResourceRequirements::default(),
        }
    }

    /// Sets command arguments.
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Sets environment variables.
    #[must_use]
    pub fn with_environment(
        mut self,
        environment: impl IntoIterator<Item = EnvironmentVariable>,
    ) -> Self {
        self.environment = environment.into_iter().collect();
        self
    }

    /// Sets resource requirements.
    #[must_use]
    pub const fn with_resources(mut self, resources: ResourceRequirements) -> Self {
        self.resources = resources;
        self
    }

    /// Returns the root filesystem reference.
    #[must_use]
    pub fn root_fs(&self) -> &str {
        &self.root_fs
    }

    /// Returns the command path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the command arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the environment variables.
    #[must_use]
    pub fn environment(&self) -> &[EnvironmentVariable] {
        &self.environment
    }

    /// Returns the resource requirements.
    #[must_use]
    pub const fn resources(&self) -> ResourceRequirements {
        self.resources
    }
}

/// Name/value pair injected into the task's process environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    name: String,
    value: String,
}

impl EnvironmentVariable {
    /// Creates an environment variable.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the variable value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Resources a cell must reserve before running the task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    memory_mb: u32,
    disk_mb: u32,
    cpu_weight: u32,
}

impl ResourceRequirements {
    /// Creates resource requirements.
    #[must_use]
    pub const fn new(memory_mb: u32, disk_mb: u32, cpu_weight: u32) -> Self {
        Self {
            memory_mb,
            disk_mb,
            cpu_weight,
        }
    }

    /// Returns the memory reservation in megabytes.
    #[must_use]
    pub const fn memory_mb(self) -> u32 {
        self.memory_mb
    }

    /// Returns the disk reservation in megabytes.
    #[must_use]
    pub const fn disk_mb(self) -> u32 {
        self.disk_mb
    }

    /// Returns the relative CPU weight.
    #[must_use]
    pub const fn cpu_weight(self) -> u32 {
        self.cpu_weight
    }
}
