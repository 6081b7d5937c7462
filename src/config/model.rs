// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::exec::DEFAULT_MODULE_RUNTIME;
use crate::resolve::{normalize, DEFAULT_BIN_DIR};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [project]
/// root = "."
/// bin_root = "tooling"
/// bin_dir = "node_modules/.bin"
/// module_runtime = "node"
///
/// [env]
/// NODE_ENV = "production"
/// ```
///
/// Both sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub project: ProjectSection,

    /// Extra variables laid over the ambient environment of every launch.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// `[project]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSection {
    /// Working directory of launched processes.
    pub root: PathBuf,

    /// Directory binary resolution starts from. Defaults to `root`.
    pub bin_root: Option<PathBuf>,

    /// Location of dependency executables relative to each ancestor.
    pub bin_dir: PathBuf,

    /// Program used to run modules (`--module`).
    pub module_runtime: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            bin_root: None,
            bin_dir: PathBuf::from(DEFAULT_BIN_DIR),
            module_runtime: DEFAULT_MODULE_RUNTIME.to_string(),
        }
    }
}

/// Validated configuration.
///
/// Constructed via `TryFrom<RawConfigFile>`, which runs the checks in
/// `validate.rs`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub project: ProjectSection,
    pub env: BTreeMap<String, String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(project: ProjectSection, env: BTreeMap<String, String>) -> Self {
        Self { project, env }
    }

    /// Defaults, rooted at `base`.
    pub fn default_at(base: &Path) -> Self {
        Self::new_unchecked(ProjectSection::default(), BTreeMap::new()).anchored(base)
    }

    /// Make relative `root` / `bin_root` relative to `base`.
    pub fn anchored(mut self, base: &Path) -> Self {
        self.project.root = anchor(base, &self.project.root);
        self.project.bin_root = self.project.bin_root.as_deref().map(|p| anchor(base, p));
        self
    }

    pub fn root(&self) -> &Path {
        &self.project.root
    }

    pub fn bin_root(&self) -> &Path {
        self.project.bin_root.as_deref().unwrap_or(&self.project.root)
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}
