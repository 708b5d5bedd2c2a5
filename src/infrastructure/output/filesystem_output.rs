//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::application::OutputService;
use crate::core::error::{Error, Result};
use crate::generation::Artifact;

/// Output service that writes artifacts to the filesystem
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<()> {
        for artifact in artifacts {
            if let Some(parent) = artifact.path.parent() {
                self.ensure_directory(parent).await?;
            }

            let mut file = fs::File::create(&artifact.path).await.map_err(|e| {
                Error::file_system(format!(
                    "Failed to create file {}: {}",
                    artifact.path.display(),
                    e
                ))
            })?;

            file.write_all(artifact.content.as_bytes())
                .await
                .map_err(|e| {
                    Error::file_system(format!(
                        "Failed to write file {}: {}",
                        artifact.path.display(),
                        e
                    ))
                })?;

            file.flush().await.map_err(|e| {
                Error::file_system(format!(
                    "Failed to flush file {}: {}",
                    artifact.path.display(),
                    e
                ))
            })?;

            debug!(path = %artifact.path.display(), "Wrote artifact");
        }

        Ok(())
    }

    async fn ensure_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).await.map_err(|e| {
            Error::file_system(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to).await.map_err(|e| {
            Error::file_system(format!(
                "Failed to copy {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })?;
        debug!(from = %from.display(), to = %to.display(), "Copied file");
        Ok(())
    }

    async fn file_exists(&self, path: &Path) -> bool {
        fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}
