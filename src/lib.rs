//! Generates publishable TypeScript client packages for gRPC services.
//!
//! A service lives in a directory named `grpc-<service>` holding the
//! generated interface definition at `src/grpc/service.ts`. The generator
//! picks the next package version (remote registry, then the local
//! `client/package.json`, then `1.0.0`) and writes a ready-to-publish
//! package to `client/`.

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;
pub mod versioning;
