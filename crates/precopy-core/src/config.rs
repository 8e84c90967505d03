//! Check configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::CheckError;

/// Default chunk size for streaming content comparison (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Configuration for a tree check.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CheckConfig {
    /// Root of the tree that would be copied.
    pub source_root: PathBuf,

    /// Root of the tree that would receive the copy.
    pub dest_root: PathBuf,

    /// Bytes read from each file per comparison step.
    #[builder(default = "DEFAULT_CHUNK_SIZE")]
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl CheckConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let source_root = self
            .source_root
            .as_ref()
            .ok_or_else(|| "Source root is required".to_string())?;
        let dest_root = self
            .dest_root
            .as_ref()
            .ok_or_else(|| "Destination root is required".to_string())?;
        let chunk_size = self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);

        match invalid_reason(source_root, dest_root, chunk_size) {
            Some(reason) => Err(reason.to_string()),
            None => Ok(()),
        }
    }
}

fn invalid_reason(source_root: &Path, dest_root: &Path, chunk_size: usize) -> Option<&'static str> {
    if source_root.as_os_str().is_empty() {
        Some("Source root cannot be empty")
    } else if dest_root.as_os_str().is_empty() {
        Some("Destination root cannot be empty")
    } else if chunk_size == 0 {
        Some("Chunk size must be greater than zero")
    } else {
        None
    }
}

impl CheckConfig {
    /// Create a new check config builder.
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::default()
    }

    /// Create a config with default tuning for two roots.
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Check the same rules the builder enforces.
    ///
    /// Configs built with [`CheckConfig::new`] or loaded through serde skip
    /// the builder, so the engine validates again before walking.
    pub fn validate(&self) -> Result<(), CheckError> {
        match invalid_reason(&self.source_root, &self.dest_root, self.chunk_size) {
            Some(reason) => Err(CheckError::InvalidConfig {
                message: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}
