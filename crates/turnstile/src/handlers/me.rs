//! Current token handler.
//!
//! Returns the authenticated claims from the verified token.

use crate::auth::Claims;
use axum::{Extension, Json};
use serde::Serialize;
use tracing::instrument;

/// Response for `/api/v1/me`.
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    /// Subject (user ID), if the token carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Token class (always "access" for anything that got this far).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Token expiration timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Token issued-at timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Handler for GET /api/v1/me
///
/// Requires valid authentication via the auth middleware; the claims arrive
/// through request extensions.
#[instrument(skip_all, name = "turnstile.handlers.me")]
pub async fn get_me(Extension(claims): Extension<Claims>) -> Json<MeResponse> {
    Json(MeResponse {
        sub: claims.sub,
        token_type: claims.token_type,
        exp: claims.exp,
        iat: claims.iat,
    })
}
