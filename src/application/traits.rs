//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::Path;

use crate::core::error::Result;
use crate::generation::Artifact;

/// Service for writing generated artifacts to the output destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write all artifacts; paths are absolute
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<()>;

    /// Ensure a directory exists
    async fn ensure_directory(&self, path: &Path) -> Result<()>;

    /// Copy an existing file, overwriting the target
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;

    /// Whether a regular file exists at `path`
    async fn file_exists(&self, path: &Path) -> bool;
}
