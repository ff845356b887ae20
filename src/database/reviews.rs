use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::review::ReviewAuthorRow;
use super::models::{Review, ReviewWithAuthor};

const REVIEW_COLUMNS: &str = "id, user_id, movie_id, rating, comment, created_at, updated_at";

const REVIEW_WITH_AUTHOR_SELECT: &str = r#"
    SELECT r.id, r.user_id, r.movie_id, r.rating, r.comment, r.created_at, r.updated_at,
           u.username AS author_username, u.name AS author_name,
           pi.id AS author_image_id, pi.url AS author_image_url, pi.label AS author_image_label
    FROM reviews r
    JOIN users u ON u.id = r.user_id
    LEFT JOIN profile_images pi ON pi.id = u.profile_image_id
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub movie_id: Option<String>,
    pub user_id: Option<i64>,
}

/// One review per user per movie: a second post replaces rating and comment.
pub async fn upsert(
    pool: &PgPool,
    user_id: i64,
    movie_id: &str,
    rating: i32,
    comment: &str,
) -> Result<Review, DatabaseError> {
    let review = sqlx::query_as::<_, Review>(&format!(
        r#"
        INSERT INTO reviews (user_id, movie_id, rating, comment)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, movie_id)
        DO UPDATE SET rating = EXCLUDED.rating,
                      comment = EXCLUDED.comment,
                      updated_at = NOW()
        RETURNING {}
        "#,
        REVIEW_COLUMNS
    ))
    .bind(user_id)
    .bind(movie_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(pool)
    .await?;
    Ok(review)
}

/// Newest first, filtered by whichever of movie and user are set.
pub async fn list(
    pool: &PgPool,
    filter: &ReviewFilter,
) -> Result<Vec<ReviewWithAuthor>, DatabaseError> {
    let rows = sqlx::query_as::<_, ReviewAuthorRow>(&format!(
        r#"{}
        WHERE ($1::TEXT IS NULL OR r.movie_id = $1)
          AND ($2::BIGINT IS NULL OR r.user_id = $2)
        ORDER BY r.created_at DESC, r.id DESC
        "#,
        REVIEW_WITH_AUTHOR_SELECT
    ))
    .bind(&filter.movie_id)
    .bind(filter.user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ReviewWithAuthor::from).collect())
}

pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Review>, DatabaseError> {
    let reviews = sqlx::query_as::<_, Review>(&format!(
        "SELECT {} FROM reviews WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        REVIEW_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<ReviewWithAuthor>, DatabaseError> {
    let rows = sqlx::query_as::<_, ReviewAuthorRow>(&format!(
        "{} ORDER BY r.created_at DESC, r.id DESC LIMIT $1",
        REVIEW_WITH_AUTHOR_SELECT
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ReviewWithAuthor::from).collect())
}
