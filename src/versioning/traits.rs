//! Port interfaces for the versioning domain

use async_trait::async_trait;
use semver::Version;

use crate::core::config::RegistryToken;
use crate::core::error::Result;

/// Looks up published package versions in a remote registry
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Latest published version of `package`, or `None` when it was never published
    async fn latest_version(&self, package: &str, token: &RegistryToken)
    -> Result<Option<Version>>;
}
