// src/exec/launcher.rs

//! Starting child processes with the launcher's execution context.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::{info, warn};

use crate::config::ConfigFile;
use crate::errors::ExecutionFailure;
use crate::exec::completion::{await_completion, ExecutionResult};
use crate::exec::context::{Environment, ExecutionContext, LaunchOptions};
use crate::exec::handle::ProcessHandle;
use crate::exec::sink::{OutputSink, TracingSink};
use crate::resolve::BinaryResolver;

/// Runtime used by [`ProcessLauncher::spawn_module`] when none is configured.
pub const DEFAULT_MODULE_RUNTIME: &str = "node";

/// Launches project-local tools and plain shell commands.
///
/// One launcher owns one [`ExecutionContext`]; all processes it starts share
/// it read-only, so concurrent launches never observe each other.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    context: Arc<ExecutionContext>,
    bin_root: PathBuf,
    resolver: BinaryResolver,
    module_runtime: String,
    sink: Arc<dyn OutputSink>,
}

impl ProcessLauncher {
    /// Create a launcher resolving binaries upward from `bin_root`.
    pub fn new(context: ExecutionContext, bin_root: impl Into<PathBuf>) -> Self {
        Self {
            context: Arc::new(context),
            bin_root: bin_root.into(),
            resolver: BinaryResolver::default(),
            module_runtime: DEFAULT_MODULE_RUNTIME.to_string(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Build a launcher from a validated config and a captured environment.
    ///
    /// The config's `[env]` table is laid over `ambient`.
    pub fn from_config(cfg: &ConfigFile, ambient: Environment) -> Self {
        let context = ExecutionContext::new(cfg.root(), ambient).with_overlay(&cfg.env);
        Self::new(context, cfg.bin_root())
            .with_resolver(BinaryResolver::default().with_bin_dir(&cfg.project.bin_dir))
            .with_module_runtime(cfg.project.module_runtime.clone())
    }

    pub fn with_resolver(mut self, resolver: BinaryResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_module_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.module_runtime = runtime.into();
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn bin_root(&self) -> &Path {
        &self.bin_root
    }

    /// Replace the captured environment, keeping the working directory.
    ///
    /// Launches already in flight keep the context they started with.
    pub fn refresh_environment(&mut self, environment: Environment) {
        let working_dir = self.context.working_dir().to_path_buf();
        self.context = Arc::new(ExecutionContext::new(working_dir, environment));
    }

    /// Location `command` would be launched from, if any.
    pub fn resolve(&self, command: &str) -> Option<PathBuf> {
        self.resolver.resolve(&self.bin_root, command)
    }

    pub fn can_run(&self, command: &str) -> bool {
        self.resolve(command).is_some()
    }

    /// Start `program args...` through the host shell.
    ///
    /// Arguments are joined with single spaces and handed to the shell as one
    /// command line, so PATH lookup, built-ins and shell quoting all apply.
    pub fn spawn_interactive(
        &self,
        program: &str,
        args: &[String],
        options: &LaunchOptions,
    ) -> ProcessHandle {
        let line = shell_line(program, args);
        let mut cmd = self.shell_command(&line);
        self.apply_context(&mut cmd, options);

        info!(program, args = ?args, "starting process via shell");
        ProcessHandle::spawn(program, cmd)
    }

    /// Start `module_path` in a fresh instance of the module runtime.
    ///
    /// No shell is involved; arguments are passed through verbatim.
    pub fn spawn_module(
        &self,
        module_path: &Path,
        args: &[String],
        options: &LaunchOptions,
    ) -> ProcessHandle {
        let mut cmd = Command::new(&self.module_runtime);
        cmd.arg(module_path).args(args);
        self.apply_context(&mut cmd, options);

        info!(
            runtime = %self.module_runtime,
            module = %module_path.display(),
            args = ?args,
            "starting module process"
        );
        ProcessHandle::spawn(&self.module_runtime, cmd)
    }

    /// Resolve `command` from the bin root and start it via the shell.
    ///
    /// Fails with `Unresolved` before anything is started when no binary is
    /// found.
    pub fn spawn_resolved(
        &self,
        command: &str,
        args: &[String],
        options: &LaunchOptions,
    ) -> Result<ProcessHandle, ExecutionFailure> {
        let Some(bin_path) = self.resolve(command) else {
            warn!(
                command,
                root = %self.bin_root.display(),
                "could not resolve local binary"
            );
            return Err(ExecutionFailure::Unresolved {
                command: command.to_string(),
                root: self.bin_root.clone(),
            });
        };

        Ok(self.spawn_interactive(&bin_path.to_string_lossy(), args, options))
    }

    /// Resolve, start and await `command`.
    pub async fn run(
        &self,
        command: &str,
        args: &[String],
        options: &LaunchOptions,
    ) -> ExecutionResult {
        let handle = self.spawn_resolved(command, args, options)?;
        await_completion(command, handle, Arc::clone(&self.sink)).await
    }

    /// Start and await a module through the module runtime.
    pub async fn run_module(
        &self,
        module_path: &Path,
        args: &[String],
        options: &LaunchOptions,
    ) -> ExecutionResult {
        let handle = self.spawn_module(module_path, args, options);
        let name = module_path.to_string_lossy();
        await_completion(&name, handle, Arc::clone(&self.sink)).await
    }

    #[cfg(windows)]
    fn shell_command(&self, line: &str) -> Command {
        let shell = self
            .context
            .environment()
            .get("ComSpec")
            .cloned()
            .unwrap_or_else(|| "cmd.exe".to_string());
        let mut c = Command::new(shell);
        // cmd.exe does its own parsing; `/s /c` strips exactly one pair of
        // quotes, so the line must not be re-quoted by the std escaper.
        c.arg("/d").arg("/s").arg("/c").raw_arg(format!("\"{line}\""));
        c
    }

    #[cfg(not(windows))]
    fn shell_command(&self, line: &str) -> Command {
        let mut c = Command::new("/bin/sh");
        c.arg("-c").arg(line);
        c
    }

    fn apply_context(&self, cmd: &mut Command, options: &LaunchOptions) {
        let (cwd, env) = self.context.merged(options);
        cmd.current_dir(cwd)
            .env_clear()
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
    }
}

fn shell_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
