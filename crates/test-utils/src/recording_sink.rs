use std::sync::{Arc, Mutex};

use binlaunch::exec::OutputSink;

/// One line observed by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedLine {
    Info { command: String, text: String },
    Error { command: String, text: String },
}

/// Sink that remembers every line it receives, in arrival order.
///
/// Clones share the same record, so a test can keep one clone and hand the
/// other to the launcher.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<RecordedLine>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<RecordedLine> {
        self.lines.lock().unwrap().clone()
    }

    /// Text of the stdout lines received for `command`.
    pub fn info_for(&self, command: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                RecordedLine::Info { command: c, text } if c == command => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Text of the stderr lines received for `command`.
    pub fn errors_for(&self, command: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                RecordedLine::Error { command: c, text } if c == command => Some(text),
                _ => None,
            })
            .collect()
    }
}

impl OutputSink for RecordingSink {
    fn info(&self, command: &str, text: &str) {
        self.lines.lock().unwrap().push(RecordedLine::Info {
            command: command.to_string(),
            text: text.to_string(),
        });
    }

    fn error(&self, command: &str, text: &str) {
        self.lines.lock().unwrap().push(RecordedLine::Error {
            command: command.to_string(),
            text: text.to_string(),
        });
    }
}
