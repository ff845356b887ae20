// handlers/public/reviews.rs - public review feeds
//
// GET /api/reviews?movieId=&userId=  - reviews for a movie and/or a user
// GET /api/reviews/recent            - home feed, decorated with movie data

use axum::extract::{Query, State};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::database::models::{RecentReview, ReviewWithAuthor};
use crate::database::reviews::{self, ReviewFilter};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::tmdb::{self, MovieCatalog};

pub const RECENT_REVIEWS_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
pub struct ReviewList<T> {
    pub reviews: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsQuery {
    pub movie_id: Option<String>,
    pub user_id: Option<String>,
}

impl ReviewsQuery {
    pub fn into_filter(self) -> Result<ReviewFilter, ApiError> {
        let movie_id = self
            .movie_id
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let user_id = match self.user_id.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| ApiError::bad_request("userId inválido"))?,
            ),
            None => None,
        };

        if movie_id.is_none() && user_id.is_none() {
            return Err(ApiError::bad_request("movieId o userId requerido"));
        }

        Ok(ReviewFilter { movie_id, user_id })
    }
}

pub async fn reviews_get(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> ApiResult<ReviewList<ReviewWithAuthor>> {
    let filter = query.into_filter()?;
    let reviews = reviews::list(&state.db, &filter).await?;
    Ok(ApiResponse::success(ReviewList { reviews }))
}

pub async fn recent_get(State(state): State<AppState>) -> ApiResult<ReviewList<RecentReview>> {
    let latest = reviews::recent(&state.db, RECENT_REVIEWS_LIMIT).await?;
    let reviews = with_movies(state.catalog.as_ref(), latest).await;
    Ok(ApiResponse::success(ReviewList { reviews }))
}

/// Look up every review's movie concurrently. A failed lookup only drops
/// that review's `movie` field.
pub async fn with_movies(
    catalog: &dyn MovieCatalog,
    reviews: Vec<ReviewWithAuthor>,
) -> Vec<RecentReview> {
    join_all(reviews.into_iter().map(|review| async move {
        let movie_id = review.review.movie_id.as_str();
        let movie = if tmdb::is_valid_movie_id(movie_id) {
            match tmdb::movie_summary(catalog, movie_id).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warn!("Movie lookup for review {} failed: {}", review.review.id, e);
                    None
                }
            }
        } else {
            None
        };
        RecentReview::new(review, movie)
    }))
    .await
}
