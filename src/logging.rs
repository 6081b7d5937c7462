// src/logging.rs

//! Logging setup for `binlaunch` using `tracing` + `tracing-subscriber`.
//!
//! The filter is built from two sources:
//! - `--log-level` sets the default level when given.
//! - `BINLAUNCH_LOG` holds `EnvFilter` directives, e.g. `debug` or
//!   `warn,binlaunch::output=info`. Its bare default level only applies when
//!   no CLI flag was passed; its per-target directives are always kept.
//!
//! Forwarded tool output is logged under the `binlaunch::output` target, so
//! it can be silenced or isolated independently of the launcher's own logs.
//! Everything goes to STDERR; stdout stays free for `--dry-run` output.

use anyhow::Result;
use tracing_subscriber::filter::{Directive, EnvFilter, LevelFilter};
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "BINLAUNCH_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR)
        .ok()
        .filter(|s| !s.trim().is_empty());
    let filter = build_filter(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

fn build_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> EnvFilter {
    let Some(lvl) = cli_level else {
        return env_value
            .and_then(|s| EnvFilter::try_new(s.trim()).ok())
            .unwrap_or_else(|| EnvFilter::new("info"));
    };

    let mut filter = EnvFilter::default().add_directive(level_filter(lvl).into());
    // Unparseable pieces are dropped rather than failing startup.
    for directive in env_value
        .unwrap_or_default()
        .split(',')
        .filter(|piece| piece.contains('='))
        .filter_map(|piece| piece.trim().parse::<Directive>().ok())
    {
        filter = filter.add_directive(directive);
    }
    filter
}

fn level_filter(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}
