use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{TokenCodec, TokenError};
use crate::config::AppConfig;
use crate::tmdb::MovieCatalog;

/// Shared by every handler through `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenCodec,
    pub catalog: Arc<dyn MovieCatalog>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: PgPool,
        catalog: Arc<dyn MovieCatalog>,
    ) -> Result<Self, TokenError> {
        let tokens = TokenCodec::new(config.security.jwt_secret.expose())?;
        Ok(Self {
            db,
            tokens,
            catalog,
            config: Arc::new(config),
        })
    }
}
