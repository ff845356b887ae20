use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::{Secret, TmdbConfig};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TMDB_API_KEY not configured")]
    NotConfigured,

    #[error("TMDB API error: {0}")]
    Status(u16),

    #[error("TMDB request failed: {0}")]
    Transport(String),

    #[error("invalid TMDB response: {0}")]
    InvalidResponse(String),
}

/// Read-only access to movie metadata. Payloads are passed through as JSON.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// GET `path` (relative to the API root, e.g. `/movie/popular`) with extra
    /// query parameters.
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value, CatalogError>;
}

/// Per-movie sub-resources exposed by the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieResource {
    Details,
    Credits,
    Similar,
    WatchProviders,
    Videos,
}

impl MovieResource {
    pub fn path(&self, movie_id: &str) -> String {
        match self {
            MovieResource::Details => format!("/movie/{}", movie_id),
            MovieResource::Credits => format!("/movie/{}/credits", movie_id),
            MovieResource::Similar => format!("/movie/{}/similar", movie_id),
            MovieResource::WatchProviders => format!("/movie/{}/watch/providers", movie_id),
            MovieResource::Videos => format!("/movie/{}/videos", movie_id),
        }
    }
}

/// TMDB movie ids are positive integers; anything else never reaches upstream.
pub fn is_valid_movie_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 12 && id.bytes().all(|b| b.is_ascii_digit())
}

/// Search results trimmed to the fields the client pages through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    pub results: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Value>,
}

impl From<Value> for SearchPage {
    fn from(mut body: Value) -> Self {
        let results = match body.get_mut("results").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        Self {
            results,
            total_results: body.get("total_results").cloned(),
            total_pages: body.get("total_pages").cloned(),
            page: body.get("page").cloned(),
        }
    }
}

pub async fn popular(catalog: &dyn MovieCatalog) -> Result<Value, CatalogError> {
    catalog.fetch("/movie/popular", &[]).await
}

pub async fn movie(
    catalog: &dyn MovieCatalog,
    movie_id: &str,
    resource: MovieResource,
) -> Result<Value, CatalogError> {
    catalog.fetch(&resource.path(movie_id), &[]).await
}

pub async fn search(
    catalog: &dyn MovieCatalog,
    query: &str,
    page: u32,
) -> Result<SearchPage, CatalogError> {
    let body = catalog
        .fetch(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await?;
    Ok(SearchPage::from(body))
}

/// `{title, poster_path}` of a movie, used to decorate review feeds.
pub async fn movie_summary(
    catalog: &dyn MovieCatalog,
    movie_id: &str,
) -> Result<Value, CatalogError> {
    let details = movie(catalog, movie_id, MovieResource::Details).await?;
    Ok(json!({
        "title": details.get("title").cloned().unwrap_or(Value::Null),
        "poster_path": details.get("poster_path").cloned().unwrap_or(Value::Null),
    }))
}

/// HTTP client for api.themoviedb.org (v3, api-key auth).
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<Secret>,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value, CatalogError> {
        let api_key = self.api_key.as_ref().ok_or(CatalogError::NotConfigured)?;
        let url = format!("{}{}", self.base_url, path);

        // Strip the URL from transport errors; it carries the api key.
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", api_key.expose()), ("language", self.language.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("TMDB {} answered {}", path, status);
            return Err(CatalogError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.without_url().to_string()))
    }
}
