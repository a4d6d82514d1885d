// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::graph::UnknownVertex;

#[derive(Error, Debug)]
pub enum TriggerGraphError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Run not found: {0} #{1}")]
    RunNotFound(String, u32),

    #[error("Cycle detected in run causes: {0}")]
    CauseCycle(String),

    #[error(transparent)]
    UnknownVertex(#[from] UnknownVertex),

    #[error("Renderer error: {0}")]
    RenderError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TriggerGraphError>;
