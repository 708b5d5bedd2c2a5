//! Writes a rendered client package into the service directory

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use crate::application::OutputService;
use crate::core::error::{Error, Result};
use crate::generation::{
    CLIENT_SRC_DIR, ClientArtifactSet, INTERFACE_FILE, client_dir, interface_source_path,
};

/// Emits `client/` for a service.
///
/// The interface definition is checked before anything is written, so a
/// missing `src/grpc/service.ts` leaves the filesystem untouched. Failures
/// after that point are not rolled back.
pub struct ClientEmitter {
    output: Arc<dyn OutputService>,
}

impl ClientEmitter {
    pub fn new(output: Arc<dyn OutputService>) -> Self {
        Self { output }
    }

    /// Write the package and return the client directory
    pub async fn emit(&self, service_dir: &Path, artifacts: &ClientArtifactSet) -> Result<PathBuf> {
        let source = interface_source_path(service_dir);
        if !self.output.file_exists(&source).await {
            error!(path = %source.display(), "Interface definition not found");
            return Err(Error::file_system(format!(
                "{} not found. Make sure the proto generation step ran first.",
                source.display()
            )));
        }

        let client = client_dir(service_dir);
        let src = client.join(CLIENT_SRC_DIR);
        self.output.ensure_directory(&src).await?;

        self.output
            .copy_file(&source, &src.join(INTERFACE_FILE))
            .await?;

        let mut output_artifacts = artifacts.artifacts();
        for artifact in &mut output_artifacts {
            artifact.path = client.join(&artifact.path);
        }
        self.output.write_artifacts(&output_artifacts).await?;

        info!(
            path = %client.display(),
            files = output_artifacts.len() + 1,
            "Client package written"
        );
        Ok(client)
    }
}
