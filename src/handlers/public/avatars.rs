// handlers/public/avatars.rs - avatar picker
//
// GET  /api/avatars       - active avatars
// POST /api/avatars/seed  - install the bundled avatars (seed routes only)

use axum::extract::State;
use serde::Serialize;

use crate::database::models::AvatarItem;
use crate::database::{avatars, seed};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AvatarList {
    pub items: Vec<AvatarItem>,
}

#[derive(Debug, Serialize)]
pub struct SeedSummary {
    pub ok: bool,
    pub count: usize,
}

pub async fn avatars_get(State(state): State<AppState>) -> ApiResult<AvatarList> {
    let items = avatars::list_active(&state.db).await?;
    Ok(ApiResponse::success(AvatarList { items }))
}

pub async fn avatars_seed(State(state): State<AppState>) -> ApiResult<SeedSummary> {
    let count = seed::seed_avatars(&state.db).await?;
    Ok(ApiResponse::success(SeedSummary { ok: true, count }))
}
