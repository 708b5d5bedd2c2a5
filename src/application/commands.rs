//! Data Transfer Objects for application layer

use serde::Serialize;
use std::path::PathBuf;

use crate::core::config::GeneratorConfig;
use crate::core::error::{Error, Result};

/// Request to generate (or only version) the client package of a service
#[derive(Debug, Clone)]
pub struct GenerateClientRequest {
    /// Service root, named `<prefix><service>`
    pub service_dir: PathBuf,
    pub config: GeneratorConfig,
}

impl GenerateClientRequest {
    pub fn new(service_dir: PathBuf, config: GeneratorConfig) -> Self {
        Self {
            service_dir,
            config,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.service_dir.is_dir() {
            return Err(Error::config(format!(
                "Service directory {} does not exist",
                self.service_dir.display()
            )));
        }
        self.config.validate()
    }
}

/// Outcome of version resolution
#[derive(Debug, Clone, Serialize)]
pub struct VersionPlan {
    pub service_name: String,
    pub package_name: String,
    pub version: String,
    pub provenance: String,
}

/// Response from client generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateClientResponse {
    pub plan: VersionPlan,
    pub output_path: PathBuf,
    pub artifacts_count: usize,
}
