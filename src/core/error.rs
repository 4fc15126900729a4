//! Error types for the nodelog engine

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("node map not found: {0}")]
    NotFound(PathBuf),

    #[error("config error: {0}")]
    Config(String),
}
