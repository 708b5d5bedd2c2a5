//! Version parsing and patch increments

use semver::Version;
use std::fmt;

use crate::core::error::Result;

/// Version assigned when neither the registry nor a local manifest has one
pub const DEFAULT_VERSION: Version = Version::new(1, 0, 0);

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Remote,
    LocalManifest,
    Default,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Remote => write!(f, "remote"),
            Provenance::LocalManifest => write!(f, "local-manifest"),
            Provenance::Default => write!(f, "default"),
        }
    }
}

/// Version to publish next, with the tier that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: Version,
    pub provenance: Provenance,
}

impl ResolvedVersion {
    pub fn new(version: Version, provenance: Provenance) -> Self {
        Self {
            version,
            provenance,
        }
    }

    /// `1.0.0` with provenance `default`
    pub fn fallback() -> Self {
        Self::new(DEFAULT_VERSION, Provenance::Default)
    }
}

/// Parse a published `major.minor.patch` version string
pub fn parse_version(raw: &str) -> Result<Version> {
    Ok(Version::parse(raw.trim())?)
}

/// Next release after `current`: patch + 1.
///
/// Major and minor never change. Pre-release and build metadata are dropped.
/// Returns `None` when the patch number cannot be incremented.
pub fn next_patch(current: &Version) -> Option<Version> {
    let patch = current.patch.checked_add(1)?;
    Some(Version::new(current.major, current.minor, patch))
}
