//! Service name resolution from the directory convention

use std::path::Path;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::generation::ServiceName;

/// Derive the service name from a service directory.
///
/// The final path segment must start with `prefix`; the remainder is the
/// service name (`grpc-account` with prefix `grpc-` yields `account`).
pub fn resolve_service_name(service_dir: &Path, prefix: &str) -> Result<ServiceName> {
    let dir_name = service_dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::config(format!(
                "Cannot determine directory name of {}",
                service_dir.display()
            ))
        })?;

    let name = dir_name.strip_prefix(prefix).ok_or_else(|| {
        Error::config(format!(
            "Current directory must start with \"{prefix}\", got \"{dir_name}\""
        ))
    })?;

    debug!(dir_name, service_name = name, "Resolved service name");
    ServiceName::new(name)
}
