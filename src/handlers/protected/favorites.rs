// handlers/protected/favorites.rs - the caller's favorite movies
//
// GET    /api/favorites
// POST   /api/favorites
// DELETE /api/favorites/:movieId

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::database::favorites;
use crate::database::models::{Favorite, NewFavorite};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::handlers::utils::{movie_id_from_value, parse_release_date, required};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthenticatedUser};
use crate::state::AppState;

const ALREADY_FAVORITE: &str = "Ya está en favoritos";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub movie_id: Option<Value>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
}

impl AddFavoriteRequest {
    pub fn validate(self) -> Result<NewFavorite, ApiError> {
        let (Some(movie_id), Some(title)) = (
            movie_id_from_value(self.movie_id.as_ref()),
            required(&self.title).map(str::to_string),
        ) else {
            return Err(ApiError::bad_request("movieId y title son requeridos"));
        };

        let release_date = match required(&self.release_date) {
            Some(raw) => Some(
                parse_release_date(raw)
                    .ok_or_else(|| ApiError::bad_request("releaseDate inválida"))?,
            ),
            None => None,
        };

        Ok(NewFavorite {
            movie_id,
            title,
            poster_path: self.poster_path.filter(|p| !p.is_empty()),
            release_date,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn favorites_get(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> ApiResult<Vec<Favorite>> {
    let list = favorites::list_for_user(&state.db, caller.id()).await?;
    Ok(ApiResponse::success(list))
}

pub async fn favorites_post(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    ApiJson(body): ApiJson<AddFavoriteRequest>,
) -> ApiResult<Favorite> {
    let new_favorite = body.validate()?;

    if favorites::find(&state.db, caller.id(), &new_favorite.movie_id)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request(ALREADY_FAVORITE));
    }

    let created = favorites::insert(&state.db, caller.id(), &new_favorite)
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => ApiError::bad_request(ALREADY_FAVORITE),
            other => other.into(),
        })?;

    info!("User {} added movie {} to favorites", caller.id(), created.movie_id);
    Ok(ApiResponse::created(created))
}

pub async fn favorites_delete(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(movie_id): Path<String>,
) -> ApiResult<MessageResponse> {
    if !favorites::delete(&state.db, caller.id(), &movie_id).await? {
        return Err(ApiError::not_found("Favorito no encontrado"));
    }
    Ok(ApiResponse::success(MessageResponse {
        message: "Favorito eliminado",
    }))
}
