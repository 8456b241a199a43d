//! src/error.rs
//! ============================================================================
//! # AppError: Unified Error Type for the Tree Navigator
//!
//! This module defines the error enum (`AppError`) used across the entire
//! application. Store operations map raw io errors onto the richer variants
//! (`NotFound`, `AlreadyExists`, `PermissionDenied`) so the UI can report
//! failures precisely; all major modules use `Result<T, AppError>`.

use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Unified error type for all navigator operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Requested file or folder does not exist.
    #[error("File or folder not found: {0:?}")]
    NotFound(PathBuf),

    /// Create/rename target already exists.
    #[error("Already exists: {0:?}")]
    AlreadyExists(PathBuf),

    /// Name rejected before reaching the filesystem.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// Permissions error for file/folder access.
    #[error("Permission denied: {0:?}")]
    PermissionDenied(PathBuf),

    /// Error retrieving file or folder metadata.
    #[error("Filesystem metadata error on {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// TOML config serialization error.
    #[error("Config serialize error: {0}")]
    ConfigSer(#[from] toml::ser::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Terminal I/O or rendering error.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Map an io error affecting `path` onto the richer store error kinds.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => AppError::NotFound(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => AppError::AlreadyExists(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => AppError::PermissionDenied(path.to_path_buf()),
            _ => AppError::Io(source),
        }
    }
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Other(e.to_string())
    }
}
