// src/resolve.rs

//! Locating project-local executables.
//!
//! A command like `eslint` is looked up as `<dir>/node_modules/.bin/eslint`
//! for `dir` = the search root and then every ancestor of it, closest first.
//! The first existing candidate wins. Reaching the filesystem root without a
//! match yields `None`.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::fs::{FileSystem, RealFileSystem};

/// Relative location of dependency executables under each ancestor.
pub const DEFAULT_BIN_DIR: &str = "node_modules/.bin";

/// Suffix carried by installed shims on the current platform.
pub const PLATFORM_SUFFIX: Option<&str> = if cfg!(windows) { Some(".cmd") } else { None };

/// Ancestor-walking lookup of locally installed binaries.
#[derive(Debug, Clone)]
pub struct BinaryResolver {
    fs: Arc<dyn FileSystem>,
    bin_dir: PathBuf,
    suffix: Option<String>,
}

impl Default for BinaryResolver {
    fn default() -> Self {
        Self::new(Arc::new(RealFileSystem))
    }
}

impl BinaryResolver {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            bin_dir: PathBuf::from(DEFAULT_BIN_DIR),
            suffix: PLATFORM_SUFFIX.map(str::to_string),
        }
    }

    pub fn with_bin_dir(mut self, bin_dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = bin_dir.into();
        self
    }

    pub fn with_suffix(mut self, suffix: Option<&str>) -> Self {
        self.suffix = suffix.map(str::to_string);
        self
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Find `command` under the bin dir of `root` or its closest ancestor.
    ///
    /// `root` is made absolute against the current directory and normalized
    /// (`.` dropped, `..` collapsed) first, so the walk only ever visits real
    /// ancestors, each exactly once, and stops at the filesystem root.
    pub fn resolve(&self, root: &Path, command: &str) -> Option<PathBuf> {
        let start = absolutize(root);
        let file_name = match &self.suffix {
            Some(suffix) => format!("{command}{suffix}"),
            None => command.to_string(),
        };

        let mut dir = start.as_path();
        let mut depth = 0usize;
        loop {
            let candidate = dir.join(&self.bin_dir).join(&file_name);
            if self.fs.exists(&candidate) {
                debug!(command, depth, path = %candidate.display(), "resolved local binary");
                return Some(candidate);
            }

            match dir.parent() {
                Some(parent) if parent != dir => {
                    dir = parent;
                    depth += 1;
                }
                _ => {
                    debug!(
                        command,
                        depth,
                        root = %start.display(),
                        "reached filesystem root without a match"
                    );
                    return None;
                }
            }
        }
    }
}

fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize(&absolute)
}

/// Lexically collapse `.` and `..`; `..` never climbs above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
