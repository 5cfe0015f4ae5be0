//! Error types for relic.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Fingerprint errors
    #[error("Failed to hash input file {path}: {source}")]
    Fingerprint {
        path: PathBuf,
        source: std::io::Error,
    },

    // Build errors
    #[error("Build command failed with exit code {exit_code}")]
    BuildFailed { exit_code: i32 },

    #[error("Failed to spawn build command: {0}")]
    BuildSpawn(String),

    // Archive errors
    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Extraction error: {0}")]
    Extract(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Infrastructure errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
