// src/config/mod.rs

//! Optional `Binlaunch.toml` project configuration.
//!
//! - [`model`] holds the serde types.
//! - [`validate`] turns a `RawConfigFile` into a checked `ConfigFile`.
//! - [`loader`] reads files through the [`crate::fs::FileSystem`] abstraction.

pub mod loader;
pub mod model;
mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{ConfigFile, ProjectSection, RawConfigFile};
