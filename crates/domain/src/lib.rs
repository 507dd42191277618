//! # Campline Domain
//!
//! Plain data types and error definitions for the Campline request pipeline.
//!
//! This crate contains:
//! - Wire-level request/response types ([`HttpRequest`], [`HttpResponse`])
//! - The bearer [`Credential`] and cached response [`CacheEntry`]
//! - The typed outcome of an exchange ([`ApiResponse`] / [`ApiError`])
//! - Client configuration ([`ClientConfig`])
//! - Typed accessors over JSON payloads ([`JsonExt`])
//!
//! ## Architecture
//! - Depends only on `campline-common` and external crates
//! - No I/O: nothing here talks to the network or the filesystem

pub mod config;
pub mod constants;
pub mod errors;
pub mod json;
pub mod types;

// Re-export commonly used items
pub use config::{CacheSettings, ClientConfig, OAuthSettings};
pub use errors::{ApiError, ConfigError, JsonShapeError, Result, TransportError};
pub use json::JsonExt;
pub use types::*;
