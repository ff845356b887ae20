mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

async fn post(uri: &str, body: serde_json::Value) -> Result<(StatusCode, serde_json::Value)> {
    let req = common::request(Method::POST, uri, None, Some(body));
    common::send(&common::app(), req).await
}

#[tokio::test]
async fn register_requires_three_fields() -> Result<()> {
    let (status, body) = post("/api/auth/register", json!({ "email": "ana@example.com" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email, username y password son requeridos");
    Ok(())
}

#[tokio::test]
async fn register_rejects_short_password() -> Result<()> {
    let (status, body) = post(
        "/api/auth/register",
        json!({ "email": "ana@example.com", "username": "ana", "password": "123" }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password debe tener al menos 6 caracteres");
    Ok(())
}

#[tokio::test]
async fn login_requires_email_and_password() -> Result<()> {
    let (status, body) = post("/api/auth/login", json!({ "email": "ana@example.com" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email y password son requeridos");
    Ok(())
}

#[tokio::test]
async fn malformed_json_uses_api_error_body() -> Result<()> {
    let req = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ not json"))?;
    let (status, body) = common::send(&common::app(), req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}
