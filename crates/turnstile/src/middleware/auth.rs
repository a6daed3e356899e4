//! Authentication middleware for protected routes.
//!
//! Extracts the Bearer token from the Authorization header, verifies it with
//! the token verifier, and injects the claims into request extensions. A
//! missing or malformed header is rejected here, before the verifier runs.

use crate::auth::TokenVerifier;
use crate::errors::AuthError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    /// Token verifier backed by the key cache.
    pub verifier: Arc<TokenVerifier>,
}

/// Authentication middleware guarding protected routes.
///
/// # Authorization Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// - 401 Unauthorized with a `WWW-Authenticate` header if the header is
///   missing/malformed or the token fails verification
/// - Continues to the next handler with claims in extensions otherwise
#[instrument(skip(state, req, next), name = "turnstile.middleware.auth")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AuthError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!(target: "turnstile.middleware.auth", "Missing Authorization header");
            AuthError::MalformedToken
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::debug!(target: "turnstile.middleware.auth", "Invalid Authorization header format");
        AuthError::MalformedToken
    })?;

    let claims = state.verifier.verify(token).await?;

    // Store claims in request extensions for downstream handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
