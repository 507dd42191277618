//! # Campline Infrastructure
//!
//! Adapters for the ports defined in `campline-core`.
//!
//! This crate contains:
//! - A blocking `reqwest` transport
//! - A bounded in-memory response cache
//! - `mime_guess` content types for uploads
//! - Configuration loading from the environment or JSON/TOML files
//! - Tracing subscriber setup
//! - [`CamplineClient`], the facade most callers use
//!
//! ## Architecture
//! - Implements traits defined in `campline-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod mime;
pub mod observability;

// Re-export commonly used items
pub use cache::InMemoryResponseCache;
pub use client::CamplineClient;
pub use errors::InfraError;
pub use http::{ReqwestTransport, ReqwestTransportBuilder};
pub use mime::MimeGuessResolver;
pub use observability::{init_tracing, LogFormat};
