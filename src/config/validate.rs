// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{BinlaunchError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::BinlaunchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.project, raw.env))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_bin_dir(cfg)?;
    validate_module_runtime(cfg)?;
    validate_env(cfg)?;
    Ok(())
}

fn validate_bin_dir(cfg: &RawConfigFile) -> Result<()> {
    let bin_dir = &cfg.project.bin_dir;
    if bin_dir.as_os_str().is_empty() {
        return Err(BinlaunchError::ConfigError(
            "[project].bin_dir must not be empty".to_string(),
        ));
    }
    if bin_dir.is_absolute() {
        return Err(BinlaunchError::ConfigError(format!(
            "[project].bin_dir must be relative (got {:?})",
            bin_dir
        )));
    }
    Ok(())
}

fn validate_module_runtime(cfg: &RawConfigFile) -> Result<()> {
    if cfg.project.module_runtime.trim().is_empty() {
        return Err(BinlaunchError::ConfigError(
            "[project].module_runtime must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_env(cfg: &RawConfigFile) -> Result<()> {
    for (key, value) in cfg.env.iter() {
        if key.is_empty() {
            return Err(BinlaunchError::ConfigError(
                "[env] contains an empty variable name".to_string(),
            ));
        }
        if key.contains('=') || key.contains('\0') {
            return Err(BinlaunchError::ConfigError(format!(
                "[env] variable name '{}' must not contain '=' or NUL",
                key.escape_default()
            )));
        }
        if value.contains('\0') {
            return Err(BinlaunchError::ConfigError(format!(
                "[env] value of '{}' must not contain NUL",
                key
            )));
        }
    }
    Ok(())
}
