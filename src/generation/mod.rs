//! Generation domain module
//!
//! Resolves the service name and turns it, together with a resolved version,
//! into the text artifacts of a publishable client package.

pub mod manifest;
pub mod naming;
pub mod templater;
pub mod types;

pub use naming::resolve_service_name;
pub use templater::{ArtifactTemplater, render_build_config};
pub use types::*;
