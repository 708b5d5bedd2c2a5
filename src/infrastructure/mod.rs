//! Infrastructure layer - concrete implementations of domain ports

pub mod output;
pub mod registry;
pub mod shell;

pub use output::FileSystemOutputService;
pub use registry::registry_for;
pub use shell::*;
