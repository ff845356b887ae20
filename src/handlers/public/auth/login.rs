// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::extract::State;
use serde::Deserialize;
use tracing::{debug, info};

use crate::auth::password::verify_password;
use crate::database::users;
use crate::error::ApiError;
use crate::handlers::utils::required;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::AuthResponse;

/// Same answer for unknown email and wrong password.
pub const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login - exchange email and password for a token
///
/// Expected Input:
/// ```json
/// { "email": "ana@example.com", "password": "secreto" }
/// ```
pub async fn login_post(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let (Some(email), Some(password)) = (required(&body.email), required(&body.password)) else {
        return Err(ApiError::bad_request("Email y password son requeridos"));
    };

    let Some(user) = users::find_by_email(&state.db, email).await? else {
        debug!("Login for unknown email");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(password.to_string(), user.password.clone()).await? {
        debug!("Wrong password for user {}", user.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    info!("User {} logged in", user.id);
    Ok(ApiResponse::success(AuthResponse::for_user(
        &state,
        &user,
        "Login successful",
    )?))
}
