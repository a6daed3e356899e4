//! Public key source for the authentication service.
//!
//! The auth service publishes its signing keys as a JSON object mapping key
//! id to PEM-encoded RSA public key. `KeySource` is the seam between the
//! cache and that endpoint: one fetch, no internal retry (retry policy
//! belongs to the caller), and a failure type that keeps "service
//! unreachable" distinguishable from "service returned zero keys".

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

/// Errors from a public-key fetch.
#[derive(Debug, Error)]
pub enum KeySourceError {
    /// The request could not be completed (timeout, connection refused, DNS).
    #[error("key fetch request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("key endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not a JSON object of kid -> PEM strings.
    #[error("failed to parse key response: {0}")]
    Parse(String),
}

/// Source of public keys, keyed by key id.
///
/// An empty map is a valid (if unhelpful) result; only transport and parse
/// problems are errors.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn fetch(&self) -> Result<HashMap<String, String>, KeySourceError>;
}

/// `KeySource` backed by the auth service's public-keys HTTP endpoint.
pub struct HttpKeySource {
    /// URL of the public-keys endpoint.
    url: String,

    /// HTTP client with a bounded request timeout.
    client: reqwest::Client,
}

impl HttpKeySource {
    /// Create a key source fetching from `url` with the given request timeout.
    ///
    /// Falls back to a stock client if the builder rejects the timeout; the
    /// fetch still works, it just runs without the configured bound.
    pub fn new(url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(target: "turnstile.auth.keys", error = %e, "Key fetch client rejected its timeout, continuing without one");
                reqwest::Client::new()
            });

        Self { url, client }
    }
}

#[async_trait]
impl KeySource for HttpKeySource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<HashMap<String, String>, KeySourceError> {
        tracing::debug!(target: "turnstile.auth.keys", url = %self.url, "Fetching public keys from auth service");

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            tracing::error!(
                target: "turnstile.auth.keys",
                status = %response.status(),
                "Public keys endpoint returned error"
            );
            return Err(KeySourceError::Status(response.status()));
        }

        let keys: HashMap<String, String> = response
            .json()
            .await
            .map_err(|e| KeySourceError::Parse(e.to_string()))?;

        Ok(keys)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_parses_kid_to_pem_map() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public-keys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "key-1": "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----",
                "key-2": "-----BEGIN PUBLIC KEY-----\nBBBB\n-----END PUBLIC KEY-----"
            })))
            .mount(&server)
            .await;

        let source = HttpKeySource::new(
            format!("{}/public-keys", server.uri()),
            Duration::from_secs(5),
        );

        let keys = source.fetch().await.unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.get("key-1").unwrap().contains("AAAA"));
        assert!(keys.get("key-2").unwrap().contains("BBBB"));
    }

    #[tokio::test]
    async fn test_fetch_empty_map_is_ok() {
        // Zero keys is a valid response, distinct from an unreachable service
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public-keys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let source = HttpKeySource::new(
            format!("{}/public-keys", server.uri()),
            Duration::from_secs(5),
        );

        let keys = source.fetch().await.unwrap();
        assert!(keys.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public-keys"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = HttpKeySource::new(
            format!("{}/public-keys", server.uri()),
            Duration::from_secs(5),
        );

        let err = source.fetch().await.expect_err("Expected error");
        assert!(matches!(err, KeySourceError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_fetch_non_object_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public-keys"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!(["not", "a", "map"])),
            )
            .mount(&server)
            .await;

        let source = HttpKeySource::new(
            format!("{}/public-keys", server.uri()),
            Duration::from_secs(5),
        );

        let err = source.fetch().await.expect_err("Expected error");
        assert!(matches!(err, KeySourceError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_request_error() {
        // Nothing is listening on this address
        let source = HttpKeySource::new(
            "http://127.0.0.1:1/public-keys".to_string(),
            Duration::from_secs(1),
        );

        let err = source.fetch().await.expect_err("Expected error");
        assert!(matches!(err, KeySourceError::Request(_)));
    }
}
