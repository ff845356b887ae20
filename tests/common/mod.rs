#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use cineteca_api::auth::token_ttl;
use cineteca_api::config::AppConfig;
use cineteca_api::database::DatabaseManager;
use cineteca_api::routes;
use cineteca_api::state::AppState;
use cineteca_api::tmdb::{CatalogError, MovieCatalog};

pub const TEST_SECRET: &str = "integration-secret";

/// Canned catalog: `/movie/500*` fails upstream, everything else echoes the
/// path it was asked for.
pub struct StubCatalog;

#[async_trait]
impl MovieCatalog for StubCatalog {
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value, CatalogError> {
        let params: HashMap<&str, &str> = query.iter().map(|(k, v)| (*k, v.as_str())).collect();
        match path {
            "/search/movie" => Ok(json!({
                "page": params.get("page").and_then(|p| p.parse::<u64>().ok()),
                "results": [{ "id": 238, "title": params.get("query") }],
                "total_pages": 1,
                "total_results": 1,
                "dates": { "minimum": "2000-01-01" }
            })),
            "/movie/popular" => Ok(json!({ "page": 1, "results": [{ "id": 550 }] })),
            p if p.starts_with("/movie/500") => Err(CatalogError::Status(500)),
            p => Ok(json!({ "path": p })),
        }
    }
}

/// Catalog with no API key configured.
pub struct UnconfiguredCatalog;

#[async_trait]
impl MovieCatalog for UnconfiguredCatalog {
    async fn fetch(&self, _path: &str, _query: &[(&str, String)]) -> Result<Value, CatalogError> {
        Err(CatalogError::NotConfigured)
    }
}

/// Config for a given environment profile. The database URL points nowhere;
/// the exercised paths answer before touching the pool.
pub fn config(vars: &[(&str, &str)]) -> AppConfig {
    let mut map: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), TEST_SECRET.to_string()),
        (
            "DATABASE_URL".to_string(),
            "postgres://cineteca@127.0.0.1:1/unused".to_string(),
        ),
        ("DATABASE_CONNECTION_TIMEOUT".to_string(), "1".to_string()),
    ]);
    for (k, v) in vars {
        map.insert(k.to_string(), v.to_string());
    }
    AppConfig::from_lookup(|key| map.get(key).cloned()).expect("test config")
}

pub fn state_with(config: AppConfig, catalog: Arc<dyn MovieCatalog>) -> AppState {
    let db = DatabaseManager::connect_lazy(&config.database).expect("lazy pool");
    AppState::new(config, db, catalog).expect("state")
}

pub fn state() -> AppState {
    state_with(config(&[]), Arc::new(StubCatalog))
}

pub fn app() -> Router {
    routes::app(state())
}

/// State backed by a real Postgres, migrated. `TEST_DATABASE_URL` (or
/// `DATABASE_URL`) selects it; without one the caller skips its test.
pub async fn live_state() -> Result<Option<AppState>> {
    let Some(url) = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
    else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return Ok(None);
    };

    let config = config(&[("DATABASE_URL", url.as_str()), ("DATABASE_CONNECTION_TIMEOUT", "5")]);
    let db = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&db).await?;
    Ok(Some(AppState::new(config, db, Arc::new(StubCatalog))?))
}

/// Suffix that keeps rows from separate tests and runs apart.
pub fn unique(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    format!(
        "{}{}x{}x{}",
        prefix,
        chrono::Utc::now().timestamp_micros(),
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

pub fn token_for(user_id: i64) -> String {
    state().tokens.issue(user_id, token_ttl()).expect("token")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn request(method: Method, uri: &str, authorization: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request")
}

pub fn get(uri: &str) -> Request<Body> {
    request(Method::GET, uri, None, None)
}

/// Send one request through `app` and decode the JSON body (Null when empty).
pub async fn send(app: &Router, req: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(req).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?
    };
    Ok((status, body))
}
