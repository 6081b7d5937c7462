// src/exec/sink.rs

//! Destination for the output lines of launched processes.

use std::fmt::Debug;

use tracing::{error, info};

/// Receives child output as it arrives.
///
/// stdout lines go to [`OutputSink::info`], stderr lines to
/// [`OutputSink::error`]. Implementations are shared between concurrent
/// launches and must tolerate calls from several tasks at once.
pub trait OutputSink: Send + Sync + Debug {
    fn info(&self, command: &str, text: &str);
    fn error(&self, command: &str, text: &str);
}

/// Default sink: re-emits every line as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn info(&self, command: &str, text: &str) {
        info!(target: "binlaunch::output", command, "{}", text);
    }

    fn error(&self, command: &str, text: &str) {
        error!(target: "binlaunch::output", command, "{}", text);
    }
}
