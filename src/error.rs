// src/error.rs

//! Error types shared across the crate

use thiserror::Error;

/// Errors produced by the transport and configuration layers.
///
/// Repository loading itself never surfaces these across the `Repository`
/// boundary: network and format problems there degrade to an empty catalog
/// plus the repository's `loaded` flag (see [`crate::repository`]).
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to construct a component (HTTP client, etc.)
    #[error("Initialization error: {0}")]
    Init(String),

    /// Network fetch failed
    #[error("Download error: {0}")]
    Download(String),

    /// Repository configuration problems
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
