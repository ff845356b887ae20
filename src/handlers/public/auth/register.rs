// handlers/public/auth/register.rs - POST /api/auth/register handler

use axum::extract::State;
use serde::Deserialize;
use tracing::info;

use crate::auth::password::hash_password;
use crate::database::users::{self, NewUser};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::handlers::utils::required;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::AuthResponse;

pub const MIN_PASSWORD_LEN: usize = 6;

const DUPLICATE_ACCOUNT: &str = "Email o username ya existe";

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
}

/// Checked request fields, borrowed from the body.
#[derive(Debug, PartialEq, Eq)]
pub struct Registration<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub username: &'a str,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<Registration<'_>, ApiError> {
        let (Some(email), Some(password), Some(username)) = (
            required(&self.email),
            required(&self.password),
            required(&self.username),
        ) else {
            return Err(ApiError::bad_request("Email, username y password son requeridos"));
        };

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::bad_request("Password debe tener al menos 6 caracteres"));
        }

        Ok(Registration {
            email,
            password,
            username,
        })
    }
}

/// POST /api/auth/register - create an account and sign the caller in
///
/// Expected Input:
/// ```json
/// { "email": "ana@example.com", "password": "secreto", "username": "ana", "name": "Ana" }
/// ```
///
/// Answers 201 with `{ message, token, user }`.
pub async fn register_post(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    let registration = body.validate()?;

    if users::email_or_username_taken(&state.db, registration.email, registration.username).await? {
        return Err(ApiError::bad_request(DUPLICATE_ACCOUNT));
    }

    let password_hash = hash_password(registration.password.to_string()).await?;
    let new_user = NewUser {
        email: registration.email.to_string(),
        username: registration.username.to_string(),
        password_hash,
        name: body.name.clone(),
    };

    // A concurrent registration can still win the race past the check above.
    let user = users::create(&state.db, &new_user).await.map_err(|e| match e {
        DatabaseError::UniqueViolation(_) => ApiError::bad_request(DUPLICATE_ACCOUNT),
        other => other.into(),
    })?;

    info!("Registered user {}", user.id);
    Ok(ApiResponse::created(AuthResponse::for_user(
        &state,
        &user,
        "User created successfully",
    )?))
}
