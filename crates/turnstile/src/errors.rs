//! Turnstile error types.
//!
//! `AuthError` enumerates the six rejection kinds a verification attempt can
//! produce. Every one of them maps to 401 Unauthorized at the HTTP boundary;
//! the distinct variants exist so callers and tests can assert on the reason
//! and so log treatment can differ (a `ServiceUnavailable` is an operational
//! problem, an `InvalidSignature` is a client problem).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that prevent the service from starting or keep it from serving.
///
/// These never reach a client; they abort `main` with a logged cause.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("invalid bind address: {0}")]
    BindAddress(#[from] std::net::AddrParseError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Authorization rejection reasons.
///
/// All variants map to 401 Unauthorized:
/// - MalformedToken: not a well-formed JWT, or the `kid` header is missing
/// - UnknownKeyId: `kid` not in the key cache, even after a refetch
/// - InvalidSignature: signature does not verify against the resolved key
/// - Expired: `exp` claim is in the past
/// - InvalidClaims: `type` claim is not exactly "access"
/// - ServiceUnavailable: the auth service could not be reached for a refetch
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("malformed bearer token")]
    MalformedToken,

    #[error("unknown key id")]
    UnknownKeyId,

    #[error("token signature verification failed")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("invalid token claims")]
    InvalidClaims,

    #[error("authentication service unavailable")]
    ServiceUnavailable,
}

impl AuthError {
    /// Machine-readable rejection code returned in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MalformedToken => "malformed-token",
            AuthError::UnknownKeyId => "unknown-key-id",
            AuthError::InvalidSignature => "invalid-signature",
            AuthError::Expired => "expired",
            AuthError::InvalidClaims => "invalid-claims",
            AuthError::ServiceUnavailable => "service-unavailable",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // An unreachable auth service is an operational condition, not a
        // client mistake. Log it loudly; the client still sees a plain 401.
        if self == AuthError::ServiceUnavailable {
            tracing::warn!(
                target: "turnstile.availability",
                "Rejecting request: authentication service unavailable"
            );
        }

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        let mut response =
            (StatusCode::UNAUTHORIZED, Json(error_response)).into_response();

        if let Ok(header_value) =
            "Bearer realm=\"turnstile-api\", error=\"invalid_token\"".parse()
        {
            response
                .headers_mut()
                .insert("WWW-Authenticate", header_value);
        }

        response
    }
}
