//! Application layer - orchestrates use cases and coordinates between domains

pub mod commands;
pub mod emit_client;
pub mod generate_client;
pub mod traits;

pub use commands::*;
pub use emit_client::ClientEmitter;
pub use generate_client::GenerateClientUseCase;
pub use traits::*;
