use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: String,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new favorite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavorite {
    pub movie_id: String,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
}
