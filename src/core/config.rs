//! Generator configuration and registry credentials
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! command-line overrides applied by the binary. The registry credential is
//! never part of the configuration file; it is read through a
//! [`CredentialSource`] so tests can inject it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::error::{Error, Result};

/// File name looked up in the service directory when no explicit config is given
pub const CONFIG_FILE_NAME: &str = "grpc-clientgen.toml";

/// Backend used to look up the latest published package version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegistryBackend {
    /// Shell out to `npm view` with a temporary `.npmrc`
    #[default]
    Npm,
    /// Query the registry's package document over HTTP
    Http,
}

impl fmt::Display for RegistryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryBackend::Npm => write!(f, "npm"),
            RegistryBackend::Http => write!(f, "http"),
        }
    }
}

/// Settings for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory-name prefix stripped to obtain the service name
    pub dir_prefix: String,
    /// npm scope of the published client package, including the `@`
    pub package_scope: String,
    /// Registry queried for versions and used as the publish target
    pub registry_url: Url,
    /// Git URL written into the manifest's `repository` field
    pub repository_url: String,
    /// Environment variable holding the registry token
    pub token_env: String,
    pub registry_backend: RegistryBackend,
    /// Upper bound on a single registry query
    pub registry_timeout_secs: u64,
    /// Command run in the service directory before generation
    pub proto_command: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dir_prefix: "grpc-".to_string(),
            package_scope: "@events-project".to_string(),
            registry_url: Url::parse("https://npm.pkg.github.com")
                .expect("default registry URL is valid"),
            repository_url: "git+https://github.com/events-project/grpc-clients.git".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            registry_backend: RegistryBackend::Npm,
            registry_timeout_secs: 5,
            proto_command: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration for a service directory.
    ///
    /// An explicit path must exist. Without one, `grpc-clientgen.toml` in the
    /// service directory is used when present, otherwise the defaults.
    pub fn load(service_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path: Option<PathBuf> = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(Error::config(format!(
                        "Config file {} does not exist",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => {
                let candidate = service_dir.join(CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        };

        let config = match path {
            Some(path) => {
                info!(path = %path.display(), "Loading generator config");
                let raw = std::fs::read_to_string(&path)?;
                toml::from_str::<GeneratorConfig>(&raw)?
            }
            None => {
                debug!("No config file found, using defaults");
                GeneratorConfig::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Check invariants the rest of the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        if self.dir_prefix.is_empty() {
            return Err(Error::config("dir_prefix cannot be empty"));
        }
        if self.dir_prefix.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(Error::config(format!(
                "dir_prefix must be lowercase to form a valid package name, got \"{}\"",
                self.dir_prefix
            )));
        }
        if self.dir_prefix.contains(['/', '\\']) {
            return Err(Error::config(format!(
                "dir_prefix must not contain path separators, got \"{}\"",
                self.dir_prefix
            )));
        }
        let scope_name = self.package_scope.strip_prefix('@').unwrap_or_default();
        if scope_name.is_empty()
            || !scope_name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "-._~".contains(c))
        {
            return Err(Error::config(format!(
                "package_scope must look like \"@scope\", got \"{}\"",
                self.package_scope
            )));
        }
        if !matches!(self.registry_url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "registry_url must be http(s), got {}",
                self.registry_url
            )));
        }
        if self.token_env.is_empty() {
            return Err(Error::config("token_env cannot be empty"));
        }
        if self.registry_timeout_secs == 0 {
            return Err(Error::config("registry_timeout_secs must be positive"));
        }
        Ok(())
    }

    pub fn registry_timeout(&self) -> Duration {
        Duration::from_secs(self.registry_timeout_secs)
    }

    /// Registry URL without a trailing slash, as npm expects it on the command line
    pub fn registry_base(&self) -> &str {
        self.registry_url.as_str().trim_end_matches('/')
    }

    /// Scoped package name for a service, e.g. `@events-project/grpc-account`
    pub fn package_name(&self, service_name: &str) -> String {
        format!("{}/{}{}", self.package_scope, self.dir_prefix, service_name)
    }
}

/// Registry bearer token, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RegistryToken(String);

impl RegistryToken {
    /// Wrap a token value; blank values count as no credential
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return None;
        }
        Some(Self(value.trim().to_string()))
    }

    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RegistryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RegistryToken(***)")
    }
}

/// Source of the registry credential, allowing injection in tests
pub trait CredentialSource: Send + Sync {
    fn registry_token(&self) -> Option<RegistryToken>;
}

/// Production implementation that reads the token from an environment variable
pub struct EnvCredentialSource {
    var: String,
}

impl EnvCredentialSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvCredentialSource {
    fn registry_token(&self) -> Option<RegistryToken> {
        std::env::var(&self.var).ok().and_then(RegistryToken::new)
    }
}

/// Mock implementation for testing with a controlled token
#[cfg(test)]
pub struct MockCredentialSource(Option<String>);

#[cfg(test)]
impl MockCredentialSource {
    pub fn new(token: Option<&str>) -> Self {
        Self(token.map(str::to_string))
    }
}

#[cfg(test)]
impl CredentialSource for MockCredentialSource {
    fn registry_token(&self) -> Option<RegistryToken> {
        self.0.clone().and_then(RegistryToken::new)
    }
}
