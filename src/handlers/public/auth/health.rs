// handlers/public/auth/health.rs - GET /api/auth/health handler

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// Liveness of the auth router. Does not touch the database.
pub async fn health_get() -> Json<Value> {
    Json(json!({ "ok": true, "time": Utc::now().to_rfc3339() }))
}
