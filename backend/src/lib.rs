//! TinyLink: a URL shortener with per-user aliases.
//!
//! Layout follows a hexagonal split: [`domain`] holds the types, the access
//! rules and the services; [`inbound`] exposes them over HTTP; [`outbound`]
//! supplies hashing and key generation.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
/// Request tracing middleware.
pub use middleware::Trace;
