// src/errors.rs

//! Crate-wide error types.
//!
//! [`ExecutionFailure`] is the outcome taxonomy of a single launch and is what
//! `run` hands back to callers. [`BinlaunchError`] wraps it together with the
//! configuration / IO errors of the outer surface (config loading, CLI).

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a launched (or to-be-launched) command did not complete successfully.
#[derive(Error, Debug)]
pub enum ExecutionFailure {
    /// No binary was found walking the ancestor chain from `root`.
    #[error("Could not resolve {command} relative to {}", .root.display())]
    Unresolved { command: String, root: PathBuf },

    /// The OS refused to create the process.
    #[error("{command} failed to start: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The process was killed by a signal instead of exiting.
    #[error("{command} exited with an unexpected signal: {signal}.")]
    Signal {
        command: String,
        signal: TerminationSignal,
    },

    /// The process exited normally with a non-zero code.
    #[error("{command} exited with an unexpected code: {code}.")]
    ExitCode { command: String, code: i32 },
}

impl ExecutionFailure {
    /// Logical command name the failure belongs to.
    pub fn command(&self) -> &str {
        match self {
            ExecutionFailure::Unresolved { command, .. }
            | ExecutionFailure::Spawn { command, .. }
            | ExecutionFailure::Signal { command, .. }
            | ExecutionFailure::ExitCode { command, .. } => command,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecutionFailure::ExitCode { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn signal(&self) -> Option<TerminationSignal> {
        match self {
            ExecutionFailure::Signal { signal, .. } => Some(*signal),
            _ => None,
        }
    }
}

/// Raw signal number that terminated a child process.
///
/// Displays as the conventional name (`SIGTERM`, `SIGKILL`, ...) where the
/// platform knows one, and as `signal <n>` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminationSignal(pub i32);

impl TerminationSignal {
    pub fn number(self) -> i32 {
        self.0
    }

    #[cfg(unix)]
    pub fn name(self) -> Option<&'static str> {
        nix::sys::signal::Signal::try_from(self.0)
            .ok()
            .map(|sig| sig.as_str())
    }

    #[cfg(not(unix))]
    pub fn name(self) -> Option<&'static str> {
        None
    }
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "signal {}", self.0),
        }
    }
}

#[derive(Error, Debug)]
pub enum BinlaunchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Execution(#[from] ExecutionFailure),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BinlaunchError {
    /// Exit code the launcher itself should finish with for this error.
    ///
    /// A child's non-zero code is passed through; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            BinlaunchError::Execution(ExecutionFailure::ExitCode { code, .. }) => *code,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BinlaunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_message_contains_code() {
        let err = ExecutionFailure::ExitCode {
            command: "eslint".to_string(),
            code: 2,
        };
        assert_eq!(err.to_string(), "eslint exited with an unexpected code: 2.");
        assert_eq!(err.exit_code(), Some(2));
        assert_eq!(err.command(), "eslint");
    }

    #[cfg(unix)]
    #[test]
    fn signal_displays_conventional_name() {
        let err = ExecutionFailure::Signal {
            command: "webpack".to_string(),
            signal: TerminationSignal(15),
        };
        assert_eq!(
            err.to_string(),
            "webpack exited with an unexpected signal: SIGTERM."
        );
        assert_eq!(err.signal(), Some(TerminationSignal(15)));
    }

    #[test]
    fn unknown_signal_falls_back_to_number() {
        assert_eq!(TerminationSignal(9999).to_string(), "signal 9999");
    }

    #[test]
    fn execution_failures_convert_and_keep_the_child_code() {
        let err: BinlaunchError = ExecutionFailure::ExitCode {
            command: "jest".to_string(),
            code: 3,
        }
        .into();
        assert!(matches!(err, BinlaunchError::Execution(_)));
        assert_eq!(err.to_string(), "jest exited with an unexpected code: 3.");
        assert_eq!(err.exit_code(), 3);

        let err = BinlaunchError::from(ExecutionFailure::Signal {
            command: "jest".to_string(),
            signal: TerminationSignal(9),
        });
        assert_eq!(err.exit_code(), 1);
        assert_eq!(BinlaunchError::ConfigError("x".to_string()).exit_code(), 1);
    }

    #[test]
    fn unresolved_message_names_root() {
        let err = ExecutionFailure::Unresolved {
            command: "tsc".to_string(),
            root: PathBuf::from("/work/app"),
        };
        assert_eq!(err.to_string(), "Could not resolve tsc relative to /work/app");
    }
}
