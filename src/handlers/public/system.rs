// handlers/public/system.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::error;

use crate::database::DatabaseManager;
use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "API is working!" }))
}

/// Readiness: answers 503 while the database cannot be reached.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let time = Utc::now().to_rfc3339();
    match DatabaseManager::health_check(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "ok": true, "database": "ok", "time": time })),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "ok": false, "database": "unavailable", "time": time })),
            )
        }
    }
}
