//! Health endpoint integration tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use common::TestGateServer;

/// Health endpoint returns 200 with the cached key count.
#[tokio::test]
async fn test_health_endpoint_returns_200() -> Result<()> {
    let server = TestGateServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["keys_cached"], 1);

    Ok(())
}

/// Health endpoint returns JSON content type.
#[tokio::test]
async fn test_health_endpoint_returns_json() -> Result<()> {
    let server = TestGateServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    assert!(
        content_type.is_some_and(|ct| ct.contains("application/json")),
        "Expected application/json content type, got {:?}",
        content_type
    );

    Ok(())
}

/// Health does not require authentication.
#[tokio::test]
async fn test_health_is_public() -> Result<()> {
    let server = TestGateServer::spawn_with_unreachable_auth().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 200);

    Ok(())
}

/// Non-existent routes return 404.
#[tokio::test]
async fn test_unknown_route_returns_404() -> Result<()> {
    let server = TestGateServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/v1/nonexistent", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 404);

    Ok(())
}
