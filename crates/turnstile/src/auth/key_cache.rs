//! In-memory public key cache with refetch-on-miss.
//!
//! The cache holds the auth service's current signing keys, keyed by the
//! raw `kid` value taken from token headers. It is populated once at startup
//! and refreshed reactively: a lookup miss triggers exactly one refetch, the
//! whole mapping is replaced with the fresh result, and a second miss is
//! treated as a genuinely unknown key. There is no TTL and no background
//! refresh.
//!
//! # Concurrency
//!
//! The mapping sits behind an `RwLock`; replacement is a single swap under
//! the write lock, so readers observe either the old or the new mapping in
//! full. The network call never happens while a lock on the mapping is held.
//! Concurrent misses are funneled through a refresh mutex: waiters re-check
//! the cache after the in-flight refresh completes, so a burst of tokens
//! referencing a just-rotated key costs one fetch, not one per request.

use crate::auth::key_source::{KeySource, KeySourceError};
use crate::errors::AuthError;
use jsonwebtoken::DecodingKey;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::instrument;

/// Cache of RSA public keys fetched from the authentication service.
pub struct KeyCache {
    /// Where fresh keys come from.
    source: Arc<dyn KeySource>,

    /// Current mapping of kid -> decoding key. Replaced wholesale on refresh.
    keys: RwLock<HashMap<String, DecodingKey>>,

    /// Serializes refreshes so concurrent misses coalesce into one fetch.
    refresh_lock: Mutex<()>,
}

impl KeyCache {
    /// Create an empty cache backed by `source`.
    pub fn new(source: Arc<dyn KeySource>) -> Self {
        Self {
            source,
            keys: RwLock::new(HashMap::new()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Populate the cache at startup.
    ///
    /// A failed initial fetch is logged and tolerated: the process must still
    /// boot with an empty cache and reject verification attempts cleanly
    /// until a later refetch succeeds.
    #[instrument(skip(self))]
    pub async fn warm(&self) {
        match self.refresh().await {
            Ok(()) => {}
            Err(e) => {
                tracing::warn!(
                    target: "turnstile.auth.keys",
                    error = %e,
                    "Initial public key fetch failed, starting with an empty cache"
                );
            }
        }
    }

    /// Number of keys currently cached.
    pub async fn key_count(&self) -> usize {
        self.keys.read().await.len()
    }

    /// Look up the public key for `kid`.
    ///
    /// `kid` is untrusted input straight from the token header and is used
    /// for nothing beyond this map lookup. On a miss, the cache refetches
    /// once, replaces the mapping, and re-checks; a key still missing after
    /// that is reported as unknown rather than retried.
    ///
    /// # Errors
    ///
    /// - `AuthError::ServiceUnavailable` if the refetch itself fails
    /// - `AuthError::UnknownKeyId` if the key is absent after a refresh
    #[instrument(skip(self), fields(kid = %kid))]
    pub async fn resolve(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        if let Some(key) = self.keys.read().await.get(kid) {
            tracing::debug!(target: "turnstile.auth.keys", kid = %kid, "Key cache hit");
            return Ok(key.clone());
        }

        // A miss usually means the auth service rotated keys and our set is
        // stale. Take the refresh lock; whoever got here first fetches, and
        // everyone else re-checks the refreshed mapping.
        let _guard = self.refresh_lock.lock().await;

        if let Some(key) = self.keys.read().await.get(kid) {
            tracing::debug!(target: "turnstile.auth.keys", kid = %kid, "Key cache hit after concurrent refresh");
            return Ok(key.clone());
        }

        self.refresh().await.map_err(|e| {
            tracing::error!(target: "turnstile.auth.keys", error = %e, "Public key refetch failed");
            AuthError::ServiceUnavailable
        })?;

        match self.keys.read().await.get(kid) {
            Some(key) => Ok(key.clone()),
            None => {
                tracing::warn!(target: "turnstile.auth.keys", kid = %kid, "Key not found after refresh");
                Err(AuthError::UnknownKeyId)
            }
        }
    }

    /// Fetch the complete key set and replace the cached mapping with it.
    ///
    /// PEM entries that fail to parse are dropped with a warning; they could
    /// never verify a signature anyway, and a lookup for them falls out as
    /// `UnknownKeyId`.
    async fn refresh(&self) -> Result<(), KeySourceError> {
        let fetched = self.source.fetch().await?;

        let mut keys = HashMap::with_capacity(fetched.len());
        for (kid, pem) in fetched {
            match DecodingKey::from_rsa_pem(pem.as_bytes()) {
                Ok(key) => {
                    keys.insert(kid, key);
                }
                Err(e) => {
                    tracing::warn!(
                        target: "turnstile.auth.keys",
                        kid = %kid,
                        error = %e,
                        "Discarding public key that failed to parse"
                    );
                }
            }
        }

        tracing::info!(
            target: "turnstile.auth.keys",
            key_count = keys.len(),
            "Public key cache refreshed"
        );

        *self.keys.write().await = keys;

        Ok(())
    }
}
