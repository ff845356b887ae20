// handlers/protected/auth/me.rs - GET|PUT /api/auth/me

use axum::extract::State;
use serde::Serialize;
use serde_json::Value;

use crate::database::models::UserProfile;
use crate::database::users::{self, ProfileChanges};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthenticatedUser};
use crate::state::AppState;

const USER_NOT_FOUND: &str = "Usuario no encontrado";

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

/// Fields the client may change. Values of the wrong JSON type are ignored.
pub fn profile_changes(body: &Value) -> ProfileChanges {
    ProfileChanges {
        name: body
            .get("name")
            .and_then(Value::as_str)
            .map(|name| name.trim().to_string()),
        profile_image_id: body.get("profileImageId").and_then(Value::as_i64),
    }
}

pub async fn me_get(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> ApiResult<MeResponse> {
    let user = users::find_by_id(&state.db, caller.id())
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;
    Ok(ApiResponse::success(MeResponse {
        user: UserProfile::from(&user),
    }))
}

pub async fn me_put(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<MeResponse> {
    let changes = profile_changes(&body);

    let user = users::update_profile(&state.db, caller.id(), &changes)
        .await
        .map_err(|e| match e {
            DatabaseError::ForeignKeyViolation(_) => ApiError::bad_request("Avatar inválido"),
            other => other.into(),
        })?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    Ok(ApiResponse::success(MeResponse {
        user: UserProfile::from(&user),
    }))
}
