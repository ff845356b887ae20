use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::auth::{TokenCodec, TokenError};
use crate::error::ApiError;
use crate::state::AppState;

pub const MISSING_TOKEN_MESSAGE: &str = "Token ausente";
pub const INVALID_TOKEN_MESSAGE: &str = "Token inválido";

/// Identity established by the gate. Handlers behind the gate take this as an
/// extractor and never look at the Authorization header themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i64);

impl AuthenticatedUser {
    pub fn id(&self) -> i64 {
        self.0
    }
}

/// Why a request was refused at the gate. Both variants answer 401.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("no bearer credential presented")]
    MissingCredential,

    #[error("credential rejected: {0}")]
    RejectedCredential(TokenError),
}

impl GateError {
    pub fn client_message(&self) -> &'static str {
        match self {
            GateError::MissingCredential => MISSING_TOKEN_MESSAGE,
            GateError::RejectedCredential(_) => INVALID_TOKEN_MESSAGE,
        }
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        ApiError::unauthorized(err.client_message())
    }
}

/// Extract the token from an `Authorization: Bearer <token>` value
pub fn extract_bearer(header: Option<&str>) -> Result<&str, GateError> {
    let token = header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(GateError::MissingCredential)?;

    if token.is_empty() {
        return Err(GateError::MissingCredential);
    }
    Ok(token)
}

/// Decide who is calling from the raw Authorization header value.
pub fn authenticate(
    header: Option<&str>,
    codec: &TokenCodec,
) -> Result<AuthenticatedUser, GateError> {
    let token = extract_bearer(header)?;
    codec
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(GateError::RejectedCredential)
}

/// Middleware placed in front of every protected route. On success the
/// request continues with an `AuthenticatedUser` extension; otherwise the
/// downstream handler never runs.
pub async fn identity_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A header that is not visible ASCII cannot hold a bearer token.
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match authenticate(header, &state.tokens) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Err(err) => {
            tracing::debug!("{} {} refused: {}", request.method(), request.uri().path(), err);
            Err(err.into())
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized(MISSING_TOKEN_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token_ttl;

    fn codec() -> TokenCodec {
        TokenCodec::new("gate-secret").unwrap()
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_bearer(Some("Bearer abc")), Ok("abc"));
        assert_eq!(extract_bearer(None), Err(GateError::MissingCredential));
        assert_eq!(extract_bearer(Some("Basic abc")), Err(GateError::MissingCredential));
        assert_eq!(extract_bearer(Some("bearer abc")), Err(GateError::MissingCredential));
        assert_eq!(extract_bearer(Some("Bearer ")), Err(GateError::MissingCredential));
        assert_eq!(extract_bearer(Some("Bearer    ")), Err(GateError::MissingCredential));
    }

    #[test]
    fn valid_token_yields_subject() {
        let codec = codec();
        let token = codec.issue(42, token_ttl()).unwrap();
        let header = format!("Bearer {}", token);
        assert_eq!(authenticate(Some(&header), &codec), Ok(AuthenticatedUser(42)));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = TokenCodec::new("elsewhere").unwrap().issue(42, token_ttl()).unwrap();
        let header = format!("Bearer {}", token);
        assert_eq!(
            authenticate(Some(&header), &codec()),
            Err(GateError::RejectedCredential(TokenError::InvalidSignature))
        );
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = authenticate(Some("Bearer not-a-token"), &codec()).unwrap_err();
        assert!(matches!(err, GateError::RejectedCredential(TokenError::Malformed(_))));
        assert_eq!(err.client_message(), INVALID_TOKEN_MESSAGE);
    }

    #[test]
    fn every_refusal_is_401() {
        for err in [
            GateError::MissingCredential,
            GateError::RejectedCredential(TokenError::Expired),
        ] {
            let api: ApiError = err.into();
            assert_eq!(api.status_code(), axum::http::StatusCode::UNAUTHORIZED);
        }
    }
}
