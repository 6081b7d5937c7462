// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `binlaunch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "binlaunch",
    version,
    about = "Run a tool installed in the project's dependency tree.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Binlaunch.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the directory binary resolution starts from.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BINLAUNCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Only report whether COMMAND resolves (exit 0) or not (exit 1).
    #[arg(long, conflicts_with_all = ["dry_run", "module"])]
    pub check: bool,

    /// Resolve COMMAND and print its path, but don't execute it.
    #[arg(long, conflicts_with = "module")]
    pub dry_run: bool,

    /// Treat COMMAND as a module path run by the configured module runtime.
    #[arg(long)]
    pub module: bool,

    /// Tool name (or module path with `--module`) followed by the arguments
    /// passed through to it.
    #[arg(
        value_name = "COMMAND [ARGS]",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command_line: Vec<String>,
}

impl CliArgs {
    pub fn command(&self) -> &str {
        self.command_line.first().map(String::as_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        self.command_line.get(1..).unwrap_or_default()
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_args_keep_their_dashes() {
        let args = CliArgs::try_parse_from(["binlaunch", "eslint", "--fix", "-c", "cfg.json"]).unwrap();
        assert_eq!(args.command(), "eslint");
        assert_eq!(args.args(), ["--fix", "-c", "cfg.json"]);
        assert!(!args.check);
    }

    #[test]
    fn check_conflicts_with_module() {
        let res = CliArgs::try_parse_from(["binlaunch", "--check", "--module", "x.js"]);
        assert!(res.is_err());
    }

    #[test]
    fn root_and_log_level_parse() {
        let args = CliArgs::try_parse_from([
            "binlaunch",
            "--root",
            "/repo",
            "--log-level",
            "debug",
            "tsc",
        ])
        .unwrap();
        assert_eq!(args.root, Some(PathBuf::from("/repo")));
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
        assert_eq!(args.command(), "tsc");
        assert!(args.args().is_empty());
    }
}
