use serde::Serialize;

use crate::auth::token_ttl;
use crate::database::models::{User, UserProfile};
use crate::error::ApiError;
use crate::state::AppState;

/// Body returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserProfile,
}

impl AuthResponse {
    /// Sign a fresh token for `user` with the standard lifetime.
    pub fn for_user(state: &AppState, user: &User, message: &'static str) -> Result<Self, ApiError> {
        let token = state.tokens.issue(user.id, token_ttl())?;
        Ok(Self {
            message,
            token,
            user: UserProfile::from(user),
        })
    }
}
