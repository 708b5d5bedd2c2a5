//! Resolution of the next client package version
//!
//! Tiers, in order:
//! 1. with a registry token, the latest published version (+1 patch);
//!    any lookup failure falls straight through to the default
//! 2. without a token, the version in the local `client/package.json` (+1 patch)
//! 3. `1.0.0`
//!
//! Failures are logged and never returned to the caller.

use semver::Version;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::config::{CredentialSource, GeneratorConfig};
use crate::generation::ServiceName;
use crate::versioning::local_manifest::read_local_version;
use crate::versioning::traits::RegistryClient;
use crate::versioning::version::{DEFAULT_VERSION, Provenance, ResolvedVersion, next_patch};

/// Resolves the version of the next client package for a service
pub struct VersionResolver {
    config: GeneratorConfig,
    service_dir: PathBuf,
    credentials: Arc<dyn CredentialSource>,
    registry: Arc<dyn RegistryClient>,
}

impl VersionResolver {
    pub fn new(
        config: GeneratorConfig,
        service_dir: PathBuf,
        credentials: Arc<dyn CredentialSource>,
        registry: Arc<dyn RegistryClient>,
    ) -> Self {
        Self {
            config,
            service_dir,
            credentials,
            registry,
        }
    }

    pub async fn resolve(&self, service: &ServiceName) -> ResolvedVersion {
        let package = self.config.package_name(service.as_str());

        let resolved = match self.credentials.registry_token() {
            Some(token) => {
                info!(package = %package, "Checking for latest published version");
                match self.registry.latest_version(&package, &token).await {
                    Ok(Some(latest)) => {
                        info!(latest = %latest, "Found latest version on registry, incrementing");
                        increment(&latest, Provenance::Remote)
                    }
                    Ok(None) => {
                        info!(
                            default = %DEFAULT_VERSION,
                            "Package not found on registry, using default version"
                        );
                        None
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            default = %DEFAULT_VERSION,
                            "Registry lookup failed, using default version"
                        );
                        None
                    }
                }
            }
            None => {
                info!(
                    token_env = %self.config.token_env,
                    "Registry token not set, cannot check registry for latest version"
                );
                info!("Falling back to local version check");
                match read_local_version(&self.service_dir) {
                    Ok(Some(local)) => {
                        info!(local = %local, "Using local version file, incrementing");
                        increment(&local, Provenance::LocalManifest)
                    }
                    Ok(None) => {
                        debug!("No local manifest version found");
                        None
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            "Could not parse existing package.json version, using default version"
                        );
                        None
                    }
                }
            }
        };

        resolved.unwrap_or_else(|| {
            info!(version = %DEFAULT_VERSION, "Using default version");
            ResolvedVersion::fallback()
        })
    }
}

/// Patch bump of a found version; `None` sends the caller to the default
fn increment(found: &Version, provenance: Provenance) -> Option<ResolvedVersion> {
    match next_patch(found) {
        Some(next) => {
            debug!(next = %next, %provenance, "Incremented patch version");
            Some(ResolvedVersion::new(next, provenance))
        }
        None => {
            warn!(
                found = %found,
                %provenance,
                default = %DEFAULT_VERSION,
                "Patch version cannot be incremented, using default version"
            );
            None
        }
    }
}
