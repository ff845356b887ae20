// handlers/public/movies.rs - read-only TMDB proxy
//
// GET /api/movies/popular
// GET /api/movies/:id[/credits|/similar|/watch/providers|/videos]
// GET /api/search?query=&page=

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::tmdb::{self, CatalogError, MovieResource, SearchPage};

fn upstream_failure(err: CatalogError, message: &'static str) -> ApiError {
    match err {
        CatalogError::NotConfigured => err.into(),
        other => {
            error!("{}: {}", message, other);
            ApiError::bad_gateway(message)
        }
    }
}

fn failure_message(resource: MovieResource) -> &'static str {
    match resource {
        MovieResource::Details => "Error al obtener detalles de la película",
        MovieResource::Credits => "Error al obtener el elenco",
        MovieResource::Similar => "Error al obtener películas similares",
        MovieResource::WatchProviders => "Error al obtener proveedores de streaming",
        MovieResource::Videos => "Error al obtener videos",
    }
}

pub fn checked_movie_id(raw: &str) -> Result<&str, ApiError> {
    if tmdb::is_valid_movie_id(raw) {
        Ok(raw)
    } else {
        Err(ApiError::bad_request("ID de película inválido"))
    }
}

/// Search page number; anything missing or unusable falls back to the first page.
pub fn page_or_default(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

pub async fn popular_get(State(state): State<AppState>) -> ApiResult<Value> {
    let body = tmdb::popular(state.catalog.as_ref())
        .await
        .map_err(|e| upstream_failure(e, "Error al obtener películas populares"))?;
    Ok(ApiResponse::success(body))
}

async fn movie_resource(state: &AppState, raw_id: &str, resource: MovieResource) -> ApiResult<Value> {
    let movie_id = checked_movie_id(raw_id)?;
    let body = tmdb::movie(state.catalog.as_ref(), movie_id, resource)
        .await
        .map_err(|e| upstream_failure(e, failure_message(resource)))?;
    Ok(ApiResponse::success(body))
}

pub async fn movie_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    movie_resource(&state, &id, MovieResource::Details).await
}

pub async fn credits_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    movie_resource(&state, &id, MovieResource::Credits).await
}

pub async fn similar_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    movie_resource(&state, &id, MovieResource::Similar).await
}

pub async fn watch_providers_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    movie_resource(&state, &id, MovieResource::WatchProviders).await
}

pub async fn videos_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    movie_resource(&state, &id, MovieResource::Videos).await
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub page: Option<String>,
}

pub async fn search_get(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<SearchPage> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter requerido"))?;

    let page = tmdb::search(state.catalog.as_ref(), query, page_or_default(params.page.as_deref()))
        .await
        .map_err(|e| upstream_failure(e, "Error al buscar películas"))?;
    Ok(ApiResponse::success(page))
}
