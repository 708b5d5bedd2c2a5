//! Core building blocks shared by the generator: configuration, errors and
//! identifier helpers.

pub mod config;
pub mod error;
pub mod utils;

pub use config::{CredentialSource, EnvCredentialSource, GeneratorConfig, RegistryBackend};
pub use error::{Error, Result};
