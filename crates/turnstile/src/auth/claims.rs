//! JWT claims structure.
//!
//! Claims extracted from verified tokens. The `sub` field can carry user
//! identifiers and is redacted in Debug output to keep it out of logs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token class authorizing direct API use.
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// Claims carried by a bearer token.
///
/// Every field is structurally optional so that a token missing `exp` or
/// `type` deserializes cleanly and is rejected by claim validation, keeping
/// the rejection reason "invalid claims" rather than "malformed token".
/// After a successful `verify`, `exp` is guaranteed present and in the future.
#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier) - redacted in Debug output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration timestamp (Unix epoch seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued-at timestamp (Unix epoch seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Token class, e.g. "access" or "refresh".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Custom Debug implementation that redacts the `sub` field.
impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &self.sub.as_ref().map(|_| "[REDACTED]"))
            .field("exp", &self.exp)
            .field("iat", &self.iat)
            .field("token_type", &self.token_type)
            .finish()
    }
}

impl Claims {
    /// Whether the `type` claim marks this as an access token.
    ///
    /// Case-sensitive exact match; absent counts as not-an-access-token, so
    /// refresh tokens (or any other class the issuer mints) never authorize
    /// resource access.
    pub fn is_access_token(&self) -> bool {
        self.token_type.as_deref() == Some(ACCESS_TOKEN_TYPE)
    }
}
