use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod password;

/// Lifetime of the tokens handed out by login and registration.
pub const TOKEN_TTL_HOURS: i64 = 24;

pub fn token_ttl() -> Duration {
    Duration::hours(TOKEN_TTL_HOURS)
}

/// Token payload. `id` is the subject (user id); the field name is what
/// already-issued mobile clients carry around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(
        subject_id: i64,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Generation(format!("ttl out of range: {}", ttl)))?;

        Ok(Self {
            id: subject_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("signing secret is empty")]
    EmptySecret,

    #[error("token generation failed: {0}")]
    Generation(String),
}

/// HS256 signer/verifier bound to one secret. Keys are derived once and the
/// codec is cheap to clone into request handlers.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        // Expiry is checked by hand against an explicit clock so the boundary
        // is exact (no leeway) and testable.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn issue(&self, subject_id: i64, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(subject_id, ttl, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject_id: i64,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject_id, now, ttl)?;
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<i64, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.id)
    }
}

/// Sign a token for `subject_id` valid for `ttl` from now.
pub fn issue(subject_id: i64, secret: &str, ttl: Duration) -> Result<String, TokenError> {
    TokenCodec::new(secret)?.issue(subject_id, ttl)
}

/// Check signature and expiry, returning the subject id.
pub fn verify(token: &str, secret: &str) -> Result<i64, TokenError> {
    TokenCodec::new(secret)?.verify(token)
}
