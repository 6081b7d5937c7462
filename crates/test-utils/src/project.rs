#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use binlaunch::exec::{ambient_environment, ExecutionContext, OutputSink, ProcessLauncher};
use tempfile::TempDir;

/// Builder for throwaway project trees with `node_modules/.bin` scripts.
///
/// ```ignore
/// let project = ProjectBuilder::new()
///     .bin_script("", "lint", "echo linted")
///     .dir("packages/app")
///     .build();
/// ```
pub struct ProjectBuilder {
    dir: TempDir,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp project dir"),
        }
    }

    /// Create `rel` (and its parents) below the project root.
    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(rel)).expect("failed to create dir");
        self
    }

    /// Install an executable shell script as `<rel>/node_modules/.bin/<name>`.
    pub fn bin_script(self, rel: &str, name: &str, body: &str) -> Self {
        let bin_dir = self.dir.path().join(rel).join("node_modules/.bin");
        fs::create_dir_all(&bin_dir).expect("failed to create bin dir");
        write_script(&bin_dir.join(name), body);
        self
    }

    /// Write an arbitrary file below the project root.
    pub fn file(self, rel: &str, contents: &str) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, contents).expect("failed to write file");
        self
    }

    pub fn build(self) -> Project {
        Project { dir: self.dir }
    }
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A materialised project tree; removed when dropped.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Launcher rooted at the project, resolving from `bin_root` (relative to
    /// the project root) with the ambient environment.
    pub fn launcher(&self, bin_root: &str, sink: Arc<dyn OutputSink>) -> ProcessLauncher {
        let context = ExecutionContext::new(self.root(), ambient_environment());
        ProcessLauncher::new(context, self.path(bin_root)).with_sink(sink)
    }
}

/// Write `body` as an executable `/bin/sh` script.
pub fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("failed to write script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).expect("script metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).expect("failed to chmod script");
    }
}
