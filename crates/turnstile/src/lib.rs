//! Turnstile
//!
//! A JWT-bearer authentication gate in front of a resource API. Incoming
//! requests present a bearer token; Turnstile verifies the RS256 signature
//! against a public key fetched from the authentication service (selected by
//! the token's `kid` header), checks expiry, and requires the `type` claim
//! to equal "access" before the request reaches a handler.
//!
//! # Architecture
//!
//! ```text
//! request -> middleware::require_auth -> auth::TokenVerifier
//!                                           -> auth::KeyCache -> auth::KeySource (HTTP)
//! ```
//!
//! The key cache is populated at startup and refreshed reactively: a `kid`
//! miss triggers exactly one refetch before the token is rejected. A failed
//! startup fetch is tolerated; the service boots with an empty cache and
//! fails secure (reject-all) until a fetch succeeds.
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - Rejection reasons with HTTP 401 mapping
//! - `auth` - Key source, key cache, and token verifier
//! - `middleware` - Bearer token extraction
//! - `handlers` - HTTP request handlers
//! - `models` - Response payload types
//! - `routes` - Axum router setup

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
