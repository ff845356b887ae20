use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::{Favorite, NewFavorite};

const FAVORITE_COLUMNS: &str =
    "id, user_id, movie_id, title, poster_path, release_date, created_at";

/// Newest first.
pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Favorite>, DatabaseError> {
    let favorites = sqlx::query_as::<_, Favorite>(&format!(
        "SELECT {} FROM favorites WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        FAVORITE_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(favorites)
}

pub async fn find(
    pool: &PgPool,
    user_id: i64,
    movie_id: &str,
) -> Result<Option<Favorite>, DatabaseError> {
    let favorite = sqlx::query_as::<_, Favorite>(&format!(
        "SELECT {} FROM favorites WHERE user_id = $1 AND movie_id = $2",
        FAVORITE_COLUMNS
    ))
    .bind(user_id)
    .bind(movie_id)
    .fetch_optional(pool)
    .await?;
    Ok(favorite)
}

/// Fails with `UniqueViolation` if the user already has this movie.
pub async fn insert(
    pool: &PgPool,
    user_id: i64,
    favorite: &NewFavorite,
) -> Result<Favorite, DatabaseError> {
    let created = sqlx::query_as::<_, Favorite>(&format!(
        r#"
        INSERT INTO favorites (user_id, movie_id, title, poster_path, release_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        FAVORITE_COLUMNS
    ))
    .bind(user_id)
    .bind(&favorite.movie_id)
    .bind(&favorite.title)
    .bind(&favorite.poster_path)
    .bind(favorite.release_date)
    .fetch_one(pool)
    .await?;
    Ok(created)
}

/// Returns whether a row was removed.
pub async fn delete(pool: &PgPool, user_id: i64, movie_id: &str) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND movie_id = $2")
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
