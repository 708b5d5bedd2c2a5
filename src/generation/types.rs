//! Core types for the generation domain

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::error::{Error, Result};
use crate::core::utils::{to_camel_case, to_proper_case};

/// Directory under the service root that receives the client package
pub const CLIENT_DIR: &str = "client";
/// Source directory inside the client package
pub const CLIENT_SRC_DIR: &str = "src";
pub const MANIFEST_FILE: &str = "package.json";
pub const BUILD_CONFIG_FILE: &str = "tsconfig.json";
pub const README_FILE: &str = "README.md";
pub const ENTRY_POINT_FILE: &str = "index.ts";
/// Generated interface-definition file, both as source and copy target name
pub const INTERFACE_FILE: &str = "service.ts";

const ENV_VAR_PREFIX: &str = "GRPC_";
const ENV_VAR_SUFFIX: &str = "_URL";

static SERVICE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9._-]*$").expect("valid service name regex"));

/// Location of the generated interface definition relative to the service root
pub fn interface_source_path(service_dir: &Path) -> PathBuf {
    service_dir.join("src").join("grpc").join(INTERFACE_FILE)
}

/// Location of the client package relative to the service root
pub fn client_dir(service_dir: &Path) -> PathBuf {
    service_dir.join(CLIENT_DIR)
}

/// Logical service identifier, e.g. `account` for `grpc-account`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceName(String);

impl ServiceName {
    /// Validate and wrap a service name.
    ///
    /// The name ends up inside an npm package name and a registry query, so
    /// only lowercase ASCII letters, digits, `-`, `_` and `.` are accepted.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::config("Service name cannot be empty"));
        }
        if !SERVICE_NAME_RE.is_match(&name) {
            return Err(Error::config(format!(
                "Invalid service name \"{name}\": only lowercase letters, digits, '-', '_' and '.' are allowed"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Environment variable the generated client reads its URL from.
    ///
    /// `account` becomes `GRPC_ACCOUNT_URL`. Separators that cannot appear in
    /// an environment variable name are mapped to `_`.
    pub fn env_var_name(&self) -> String {
        let upper: String = self
            .0
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{ENV_VAR_PREFIX}{upper}{ENV_VAR_SUFFIX}")
    }

    /// Prefix of the generated TypeScript service types, e.g. `Account`
    pub fn type_name(&self) -> String {
        to_proper_case(&self.0)
    }

    /// Prefix of the exported default client binding, e.g. `account`
    pub fn binding_name(&self) -> String {
        to_camel_case(&self.0)
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generated artifact, with a path relative to the client directory
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

/// The four rendered text artifacts of a client package
#[derive(Debug, Clone, PartialEq)]
pub struct ClientArtifactSet {
    pub manifest: String,
    pub build_config: String,
    pub readme: String,
    pub entry_point: String,
}

impl ClientArtifactSet {
    /// Artifacts in write order, with their paths inside the client directory
    pub fn artifacts(&self) -> Vec<Artifact> {
        vec![
            Artifact {
                path: Path::new(CLIENT_SRC_DIR).join(ENTRY_POINT_FILE),
                content: self.entry_point.clone(),
            },
            Artifact {
                path: PathBuf::from(MANIFEST_FILE),
                content: self.manifest.clone(),
            },
            Artifact {
                path: PathBuf::from(BUILD_CONFIG_FILE),
                content: self.build_config.clone(),
            },
            Artifact {
                path: PathBuf::from(README_FILE),
                content: self.readme.clone(),
            },
        ]
    }
}
