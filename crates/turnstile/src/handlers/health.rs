//! Health check handler.

use crate::models::HealthResponse;
use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// Health check handler.
///
/// Always reports "ok" once the process is serving; `keys_cached` exposes
/// whether the public key cache has been populated yet, which is the only
/// interesting readiness signal this service has. An empty cache is not an
/// error state: the service still answers and rejects auth attempts cleanly.
#[instrument(skip_all, name = "turnstile.health.check")]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        keys_cached: state.key_cache.key_count().await,
    })
}
