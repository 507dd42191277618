//! # Campline Core
//!
//! The request execution pipeline, free of I/O.
//!
//! This crate contains:
//! - Port interfaces for the HTTP transport, the response cache and
//!   content-type lookup ([`api::HttpTransport`], [`api::ResponseCache`],
//!   [`api::ContentTypeResolver`])
//! - Status classification and the conditional-GET / POST executor
//! - Multipart uploads
//! - The bearer credential lifecycle ([`auth::TokenStore`],
//!   [`auth::TokenManager`])
//!
//! ## Architecture Principles
//! - Only depends on `campline-domain` and `campline-common`
//! - Every external effect goes through a trait; adapters live in
//!   `campline-infra`
//! - Blocking and synchronous: one exchange in flight per call, no
//!   background threads, no automatic retries

pub mod api;
pub mod auth;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use api::{
    ContentTypeResolver, HttpTransport, MultipartUploader, RequestExecutor, ResponseCache,
};
pub use auth::{TokenManager, TokenStore};
