// src/exec/completion.rs

//! Turning a running child into a single [`ExecutionResult`].

use std::process::ExitStatus;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::errors::{ExecutionFailure, TerminationSignal};
use crate::exec::handle::ProcessHandle;
use crate::exec::sink::OutputSink;

/// Terminal outcome of one launch.
pub type ExecutionResult = std::result::Result<(), ExecutionFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputStream {
    Stdout,
    Stderr,
}

/// Wait for `handle` to finish, streaming its output into `sink`.
///
/// - A handle that never started resolves immediately with `Spawn`.
/// - Otherwise stdout / stderr are forwarded line by line while the process
///   runs, and the exit status is classified once both pipes are drained:
///   signal → `Signal`, code 0 → `Ok`, anything else → `ExitCode`.
pub async fn await_completion(
    command: &str,
    handle: ProcessHandle,
    sink: Arc<dyn OutputSink>,
) -> ExecutionResult {
    let mut child = match handle.into_child() {
        Ok(child) => child,
        Err(source) => return Err(on_spawn_error(command, source)),
    };

    let readers: Vec<JoinHandle<()>> = [
        child
            .stdout
            .take()
            .map(|out| forward_lines(out, OutputStream::Stdout, command, Arc::clone(&sink))),
        child
            .stderr
            .take()
            .map(|err| forward_lines(err, OutputStream::Stderr, command, Arc::clone(&sink))),
    ]
    .into_iter()
    .flatten()
    .collect();

    let status = child.wait().await;

    // Drain both pipes before reporting, so no output trails the outcome.
    for reader in readers {
        if let Err(err) = reader.await {
            warn!(command, error = %err, "output forwarding task failed");
        }
    }

    match status {
        Ok(status) => on_exit(command, status),
        Err(source) => Err(on_spawn_error(command, source)),
    }
}

fn on_spawn_error(command: &str, source: std::io::Error) -> ExecutionFailure {
    warn!(command, error = %source, "process could not be run");
    ExecutionFailure::Spawn {
        command: command.to_string(),
        source,
    }
}

fn on_exit(command: &str, status: ExitStatus) -> ExecutionResult {
    if let Some(signal) = exit_signal(&status) {
        warn!(command, %signal, "process terminated by signal");
        return Err(ExecutionFailure::Signal {
            command: command.to_string(),
            signal,
        });
    }

    let code = status.code().unwrap_or(-1);
    info!(command, exit_code = code, success = code == 0, "process exited");
    if code == 0 {
        Ok(())
    } else {
        Err(ExecutionFailure::ExitCode {
            command: command.to_string(),
            code,
        })
    }
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<TerminationSignal> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(TerminationSignal)
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<TerminationSignal> {
    None
}

fn forward_lines<R>(
    reader: R,
    stream: OutputStream,
    command: &str,
    sink: Arc<dyn OutputSink>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let command = command.to_string();
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let text = String::from_utf8_lossy(trim_line_ending(&buf));
                    match stream {
                        OutputStream::Stdout => sink.info(&command, &text),
                        OutputStream::Stderr => sink.error(&command, &text),
                    }
                }
                Err(err) => {
                    warn!(command = %command, ?stream, error = %err, "failed reading child output");
                    break;
                }
            }
        }
    })
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
