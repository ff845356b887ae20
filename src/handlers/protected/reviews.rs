// handlers/protected/reviews.rs - writing and listing the caller's reviews
//
// POST /api/reviews             - create or replace the caller's review
// GET  /api/reviews/my-reviews  - the caller's reviews

use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::models::Review;
use crate::database::reviews;
use crate::error::ApiError;
use crate::handlers::public::reviews::ReviewList;
use crate::handlers::utils::{movie_id_from_value, rating_from_value};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthenticatedUser};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub movie_id: Option<Value>,
    pub rating: Option<Value>,
    pub comment: Option<Value>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ValidReview {
    pub movie_id: String,
    pub rating: i32,
    pub comment: String,
}

impl ReviewRequest {
    pub fn validate(&self) -> Result<ValidReview, ApiError> {
        let comment = self
            .comment
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty());

        match (
            movie_id_from_value(self.movie_id.as_ref()),
            rating_from_value(self.rating.as_ref()),
            comment,
        ) {
            (Some(movie_id), Some(rating), Some(comment)) => Ok(ValidReview {
                movie_id,
                rating,
                comment: comment.to_string(),
            }),
            _ => Err(ApiError::bad_request("Datos inválidos")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review: Review,
}

pub async fn review_post(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    ApiJson(body): ApiJson<ReviewRequest>,
) -> ApiResult<ReviewResponse> {
    let valid = body.validate()?;
    let review = reviews::upsert(
        &state.db,
        caller.id(),
        &valid.movie_id,
        valid.rating,
        &valid.comment,
    )
    .await?;
    Ok(ApiResponse::created(ReviewResponse { review }))
}

pub async fn my_reviews_get(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> ApiResult<ReviewList<Review>> {
    let reviews = reviews::list_for_user(&state.db, caller.id()).await?;
    Ok(ApiResponse::success(ReviewList { reviews }))
}
