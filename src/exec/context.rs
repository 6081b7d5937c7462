// src/exec/context.rs

//! Working directory + environment applied to every launched process.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment mapping handed to child processes.
pub type Environment = BTreeMap<String, String>;

/// Immutable execution context shared by all launches of one launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    working_dir: PathBuf,
    environment: Environment,
}

impl ExecutionContext {
    pub fn new(working_dir: impl Into<PathBuf>, environment: Environment) -> Self {
        Self {
            working_dir: working_dir.into(),
            environment,
        }
    }

    /// Capture the current process environment.
    ///
    /// Non-UTF-8 keys and values are converted lossily.
    pub fn from_ambient(working_dir: impl Into<PathBuf>) -> Self {
        Self::new(working_dir, ambient_environment())
    }

    /// Copy of this context with `overlay` entries laid over the environment.
    pub fn with_overlay(&self, overlay: &Environment) -> Self {
        let mut environment = self.environment.clone();
        environment.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            working_dir: self.working_dir.clone(),
            environment,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Merge per-call overrides field by field.
    ///
    /// `cwd` replaces the working directory; `env` entries are laid over the
    /// context environment.
    pub fn merged(&self, options: &LaunchOptions) -> (PathBuf, Environment) {
        let cwd = options
            .cwd
            .clone()
            .unwrap_or_else(|| self.working_dir.clone());
        let mut env = self.environment.clone();
        env.extend(options.env.iter().map(|(k, v)| (k.clone(), v.clone())));
        (cwd, env)
    }
}

/// Snapshot of `std::env::vars_os()`.
pub fn ambient_environment() -> Environment {
    std::env::vars_os()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .collect()
}

/// Per-call partial override of the execution context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub cwd: Option<PathBuf>,
    pub env: Environment,
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}
