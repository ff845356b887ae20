// handlers/public/auth/seed.rs - GET|POST /api/auth/seed handler
// Mounted only when seed routes are enabled.

use axum::extract::State;
use serde::Serialize;

use crate::auth::password::hash_password;
use crate::database::models::User;
use crate::database::seed::{self, TEST_USER_PASSWORD};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeededUser {
    pub id: i64,
    pub email: String,
    pub username: String,
}

impl From<&User> for SeededUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: &'static str,
    pub user: SeededUser,
}

/// Ensure the shared `prueba` account exists.
pub async fn seed_test_user(State(state): State<AppState>) -> ApiResult<SeedResponse> {
    if let Some(user) = seed::find_test_user(&state.db).await? {
        return Ok(ApiResponse::success(SeedResponse {
            message: "Test user already exists",
            user: SeededUser::from(&user),
        }));
    }

    let password_hash = hash_password(TEST_USER_PASSWORD.to_string()).await?;
    let user = seed::create_test_user(&state.db, password_hash).await?;

    Ok(ApiResponse::created(SeedResponse {
        message: "Test user created",
        user: SeededUser::from(&user),
    }))
}
