// src/config/mod.rs

//! Registry file loading and validation.
//!
//! - `model.rs` defines the TOML-backed data model, settings included.
//! - `loader.rs` reads a file from disk.
//! - `validate.rs` turns a [`RawConfigFile`] into a checked [`ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, JobConfig, RawConfigFile, RunConfig, Settings};
