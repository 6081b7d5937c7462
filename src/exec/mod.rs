// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`context`] holds the shared working directory / environment and the
//!   per-call [`LaunchOptions`] overrides.
//! - [`launcher`] starts processes (shell, module runtime, or resolved local
//!   binary) and wires them to completion.
//! - [`handle`] owns one child process, or the error that kept it from
//!   starting.
//! - [`completion`] forwards child output to an [`OutputSink`] and classifies
//!   the exit into an [`ExecutionResult`].
//! - [`sink`] defines the output destination and its `tracing` default.

pub mod completion;
pub mod context;
pub mod handle;
pub mod launcher;
pub mod sink;

pub use completion::{await_completion, ExecutionResult};
pub use context::{ambient_environment, Environment, ExecutionContext, LaunchOptions};
pub use handle::ProcessHandle;
pub use launcher::{ProcessLauncher, DEFAULT_MODULE_RUNTIME};
pub use sink::{OutputSink, TracingSink};
