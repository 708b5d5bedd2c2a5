//! Version lookup in a previously generated client manifest

use semver::Version;
use serde::Deserialize;
use std::path::Path;

use crate::core::error::Result;
use crate::generation::{MANIFEST_FILE, client_dir};
use crate::versioning::version::parse_version;

#[derive(Debug, Deserialize)]
struct LocalManifest {
    #[serde(default)]
    version: Option<String>,
}

/// Version field of `client/package.json` under `service_dir`.
///
/// Returns `Ok(None)` when the file or its `version` field is absent and an
/// error when the file cannot be read or parsed.
pub fn read_local_version(service_dir: &Path) -> Result<Option<Version>> {
    let path = client_dir(service_dir).join(MANIFEST_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(&path)?;
    let manifest: LocalManifest = serde_json::from_str(&raw)?;
    manifest
        .version
        .as_deref()
        .map(parse_version)
        .transpose()
}
