//! Error types for tree checks.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::CheckConfigBuilderError;

/// Errors that make a verdict impossible to compute.
///
/// Divergences between the trees are never reported through this type;
/// they are collected as [`DivergenceNote`](crate::DivergenceNote)s.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A directory could not be enumerated, or an entry's metadata could
    /// not be read while listing it.
    #[error("Cannot list directory {path}: {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be opened, or a read failed before end-of-data.
    #[error("I/O error reading {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl From<CheckConfigBuilderError> for CheckError {
    fn from(err: CheckConfigBuilderError) -> Self {
        Self::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl CheckError {
    /// Create a listing error with path context.
    pub fn listing(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Listing {
            path: path.into(),
            source,
        }
    }

    /// Create a file I/O error with path context.
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Path the error occurred at, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Listing { path, .. } | Self::FileIo { path, .. } => Some(path.as_path()),
            Self::InvalidConfig { .. } => None,
        }
    }

    /// Whether the underlying cause was a permission problem.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Listing { source, .. } | Self::FileIo { source, .. } => {
                source.kind() == std::io::ErrorKind::PermissionDenied
            }
            Self::InvalidConfig { .. } => false,
        }
    }
}
