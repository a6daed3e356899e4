//! HTTP routes for Turnstile.
//!
//! Defines the Axum router and application state.

use crate::auth::{KeyCache, TokenVerifier};
use crate::config::Config;
use crate::handlers;
use crate::middleware::{require_auth, AuthState};
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Public key cache, shared with the verifier.
    pub key_cache: Arc<KeyCache>,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/health` - public liveness endpoint
/// - `/api/v1/me` - authenticated claims echo
/// - `/api/v1/users`, `/api/v1/orders` - protected demo resources
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>) -> Router {
    // Create the verifier over the shared key cache
    let verifier = Arc::new(TokenVerifier::new(state.key_cache.clone()));
    let auth_state = Arc::new(AuthState { verifier });

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state);

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/api/v1/me", get(handlers::get_me))
        .route("/api/v1/users", get(handlers::list_users))
        .route("/api/v1/orders", get(handlers::list_orders))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    public_routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
