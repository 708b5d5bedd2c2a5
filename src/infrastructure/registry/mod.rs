//! Registry backends for version lookups

pub mod http;
pub mod npm_cli;
pub mod npmrc;

pub use http::HttpRegistry;
pub use npm_cli::NpmCliRegistry;
pub use npmrc::NpmrcGuard;

use std::path::Path;
use std::sync::Arc;

use crate::core::config::{GeneratorConfig, RegistryBackend};
use crate::core::error::Result;
use crate::infrastructure::shell::CommandExecutor;
use crate::versioning::RegistryClient;

/// Build the registry client selected in the configuration
pub fn registry_for(
    config: &GeneratorConfig,
    executor: Arc<dyn CommandExecutor>,
    service_dir: &Path,
) -> Result<Arc<dyn RegistryClient>> {
    Ok(match config.registry_backend {
        RegistryBackend::Npm => Arc::new(NpmCliRegistry::new(
            executor,
            service_dir.to_path_buf(),
            config,
        )),
        RegistryBackend::Http => Arc::new(HttpRegistry::new(config)?),
    })
}
