//! Versioning domain module
//!
//! Finds the version the next client package is published under. Registry
//! backends live in `infrastructure::registry`.

pub mod local_manifest;
pub mod resolver;
pub mod traits;
pub mod version;

pub use resolver::VersionResolver;
pub use traits::RegistryClient;
pub use version::{DEFAULT_VERSION, Provenance, ResolvedVersion, next_patch, parse_version};
