// src/exec/handle.rs

//! Ownership of one started (or failed-to-start) child process.

use std::io;

use tokio::process::{Child, Command};
use tracing::warn;

/// Exclusive handle on a single OS child process.
///
/// A failure to create the process is not reported by the spawning call; it
/// is kept here and surfaces once the handle is awaited, so every launch has
/// exactly one asynchronous outcome.
#[derive(Debug)]
pub struct ProcessHandle {
    state: HandleState,
}

#[derive(Debug)]
enum HandleState {
    Running(Child),
    Failed(io::Error),
}

impl ProcessHandle {
    pub(crate) fn spawn(program: &str, mut cmd: Command) -> Self {
        let state = match cmd.spawn() {
            Ok(child) => HandleState::Running(child),
            Err(err) => {
                warn!(program, error = %err, "failed to spawn process");
                HandleState::Failed(err)
            }
        };
        Self { state }
    }

    /// OS process id, if the process started and has not been reaped yet.
    pub fn id(&self) -> Option<u32> {
        match &self.state {
            HandleState::Running(child) => child.id(),
            HandleState::Failed(_) => None,
        }
    }

    pub fn spawn_error(&self) -> Option<&io::Error> {
        match &self.state {
            HandleState::Failed(err) => Some(err),
            HandleState::Running(_) => None,
        }
    }

    /// Mutable access to the child for callers layering their own control
    /// (e.g. termination) on top of the launcher.
    pub fn child_mut(&mut self) -> Option<&mut Child> {
        match &mut self.state {
            HandleState::Running(child) => Some(child),
            HandleState::Failed(_) => None,
        }
    }

    pub(crate) fn into_child(self) -> io::Result<Child> {
        match self.state {
            HandleState::Running(child) => Ok(child),
            HandleState::Failed(err) => Err(err),
        }
    }
}
