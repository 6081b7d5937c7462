// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod resolve;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::errors::ExecutionFailure;
use crate::exec::{ambient_environment, LaunchOptions, ProcessLauncher};
use crate::fs::RealFileSystem;
use crate::resolve::normalize;

pub use crate::errors::BinlaunchError;
pub use crate::exec::{ExecutionContext, ExecutionResult};
pub use crate::resolve::BinaryResolver;

/// High-level entry point used by `main.rs`.
///
/// Loads the config, builds a launcher over the ambient environment and
/// performs the requested action. Returns the process exit code to use.
pub async fn run(args: CliArgs) -> Result<i32> {
    let mut cfg = load_or_default(&RealFileSystem, args.config.as_deref())?;
    if let Some(root) = &args.root {
        cfg.project.bin_root = Some(normalize(&std::path::absolute(root)?));
    }
    debug!(root = %cfg.root().display(), bin_root = %cfg.bin_root().display(), "configuration loaded");

    let launcher = ProcessLauncher::from_config(&cfg, ambient_environment());
    let command = args.command();

    if args.check {
        let ok = launcher.can_run(command);
        info!(command, can_run = ok, "check complete");
        return Ok(if ok { 0 } else { 1 });
    }

    if args.dry_run {
        return Ok(print_dry_run(&launcher, command));
    }

    let options = LaunchOptions::default();
    let result = if args.module {
        launcher
            .run_module(std::path::Path::new(command), args.args(), &options)
            .await
    } else {
        launcher.run(command, args.args(), &options).await
    };

    Ok(exit_code_for(result.map_err(BinlaunchError::from)))
}

/// Map an outcome onto the launcher's own exit code, logging any failure.
pub fn exit_code_for(outcome: errors::Result<()>) -> i32 {
    match outcome {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("{err}");
            err.exit_code()
        }
    }
}

fn print_dry_run(launcher: &ProcessLauncher, command: &str) -> i32 {
    match launcher.resolve(command) {
        Some(path) => {
            println!("{}", path.display());
            println!("  cwd: {}", launcher.context().working_dir().display());
            0
        }
        None => exit_code_for(Err(ExecutionFailure::Unresolved {
            command: command.to_string(),
            root: launcher.bin_root().to_path_buf(),
        }
        .into())),
    }
}
