// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{BinlaunchError, Result};
use crate::fs::FileSystem;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs.read_to_string(path.as_ref())?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// Relative `root` / `bin_root` entries are resolved against the directory
/// containing the config file.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let raw_config = load_from_path(fs, path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config.anchored(&config_root_dir(path)?))
}

/// Load the config the CLI should use.
///
/// - An explicit path must exist and be valid.
/// - Otherwise `Binlaunch.toml` in the current directory is used when
///   present, and built-in defaults rooted at the current directory when not.
pub fn load_or_default(fs: &dyn FileSystem, explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        if !fs.is_file(path) {
            return Err(BinlaunchError::ConfigError(format!(
                "config file {:?} does not exist",
                path
            )));
        }
        return load_and_validate(fs, path);
    }

    let cwd = std::env::current_dir()?;
    let default_path = cwd.join(default_config_path());
    if fs.is_file(&default_path) {
        load_and_validate(fs, &default_path)
    } else {
        Ok(ConfigFile::default_at(&cwd))
    }
}

/// Name of the config file looked up in the current directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Binlaunch.toml")
}

/// Directory a config path's relative entries are anchored at.
///
/// A bare file name like `Binlaunch.toml` (parent = "") falls back to the
/// current working directory.
fn config_root_dir(config_path: &Path) -> Result<PathBuf> {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(std::path::absolute(parent)?),
        _ => Ok(std::env::current_dir()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn loads_and_anchors_relative_paths() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/repo/Binlaunch.toml",
            r#"
[project]
root = "app"
bin_root = "tooling"

[env]
NODE_ENV = "production"
"#,
        );

        let cfg = load_and_validate(&fs, "/repo/Binlaunch.toml").unwrap();
        assert_eq!(cfg.root(), Path::new("/repo/app"));
        assert_eq!(cfg.bin_root(), Path::new("/repo/tooling"));
        assert_eq!(cfg.env.get("NODE_ENV").map(String::as_str), Some("production"));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let fs = MockFileSystem::new();
        fs.add_file("/repo/Binlaunch.toml", "");

        let cfg = load_and_validate(&fs, "/repo/Binlaunch.toml").unwrap();
        assert_eq!(cfg.root(), Path::new("/repo"));
        assert_eq!(cfg.bin_root(), Path::new("/repo"));
        assert!(cfg.env.is_empty());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let fs = MockFileSystem::new();
        let err = load_or_default(&fs, Some(Path::new("/nowhere/Binlaunch.toml"))).unwrap_err();
        assert!(matches!(err, BinlaunchError::ConfigError(_)));
    }
}
