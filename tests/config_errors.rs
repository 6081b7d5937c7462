// tests/config_errors.rs

use std::io::Write;
use std::path::Path;

use binlaunch::config::load_and_validate;
use binlaunch::errors::BinlaunchError;
use binlaunch::exec::{Environment, ProcessLauncher};
use binlaunch::fs::RealFileSystem;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn absolute_bin_dir_is_rejected() {
    let file = config_file(
        r#"
[project]
bin_dir = "/usr/local/bin"
"#,
    );

    match load_and_validate(&RealFileSystem, file.path()) {
        Err(BinlaunchError::ConfigError(msg)) => {
            assert!(msg.contains("bin_dir"));
            assert!(msg.contains("relative"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_module_runtime_is_rejected() {
    let file = config_file(
        r#"
[project]
module_runtime = "  "
"#,
    );

    let result = load_and_validate(&RealFileSystem, file.path());
    assert!(matches!(result, Err(BinlaunchError::ConfigError(msg)) if msg.contains("module_runtime")));
}

#[test]
fn bad_env_key_is_rejected() {
    let file = config_file(
        r#"
[env]
"A=B" = "x"
"#,
    );

    let result = load_and_validate(&RealFileSystem, file.path());
    assert!(matches!(result, Err(BinlaunchError::ConfigError(msg)) if msg.contains("A=B")));
}

#[test]
fn unknown_keys_are_toml_errors() {
    let file = config_file(
        r#"
[project]
binroot = "typo"
"#,
    );

    let result = load_and_validate(&RealFileSystem, file.path());
    assert!(matches!(result, Err(BinlaunchError::TomlError(_))));
}

#[test]
fn config_drives_the_launcher() {
    let file = config_file(
        r#"
[project]
root = "."
bin_root = "tools"
bin_dir = "vendor/bin"
module_runtime = "deno"

[env]
NODE_ENV = "production"
"#,
    );

    let cfg = load_and_validate(&RealFileSystem, file.path()).unwrap();
    let base = file.path().parent().unwrap();

    let mut ambient = Environment::new();
    ambient.insert("NODE_ENV".to_string(), "development".to_string());
    ambient.insert("PATH".to_string(), "/usr/bin".to_string());
    let launcher = ProcessLauncher::from_config(&cfg, ambient);

    assert_eq!(launcher.context().working_dir(), base);
    assert_eq!(launcher.bin_root(), base.join("tools").as_path());
    assert_eq!(
        launcher.context().environment().get("NODE_ENV").map(String::as_str),
        Some("production")
    );
    assert_eq!(
        launcher.context().environment().get("PATH").map(String::as_str),
        Some("/usr/bin")
    );
    assert!(!launcher.can_run("binlaunch-surely-not-installed-anywhere"));
    assert_ne!(launcher.bin_root(), Path::new("tools"));
}
