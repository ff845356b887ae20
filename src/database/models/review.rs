use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat row for a review joined with its author and the author's avatar.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewAuthorRow {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_username: String,
    pub author_name: Option<String>,
    pub author_image_id: Option<i64>,
    pub author_image_url: Option<String>,
    pub author_image_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorImage {
    pub id: i64,
    pub url: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAuthor {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub profile_image: Option<AuthorImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub user: ReviewAuthor,
}

impl From<ReviewAuthorRow> for ReviewWithAuthor {
    fn from(row: ReviewAuthorRow) -> Self {
        let profile_image = match (row.author_image_id, row.author_image_url) {
            (Some(id), Some(url)) => Some(AuthorImage {
                id,
                url,
                label: row.author_image_label,
            }),
            _ => None,
        };

        Self {
            user: ReviewAuthor {
                id: row.user_id,
                username: row.author_username,
                name: row.author_name,
                profile_image,
            },
            review: Review {
                id: row.id,
                user_id: row.user_id,
                movie_id: row.movie_id,
                rating: row.rating,
                comment: row.comment,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedImage {
    pub url: String,
}

/// Author as shown on the home feed: the avatar is reduced to its url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedAuthor {
    pub id: i64,
    pub name: Option<String>,
    pub username: String,
    pub profile_image: Option<FeedImage>,
}

impl From<ReviewAuthor> for FeedAuthor {
    fn from(author: ReviewAuthor) -> Self {
        Self {
            id: author.id,
            name: author.name,
            username: author.username,
            profile_image: author.profile_image.map(|image| FeedImage { url: image.url }),
        }
    }
}

/// Review for the home feed, optionally decorated with catalog data.
#[derive(Debug, Clone, Serialize)]
pub struct RecentReview {
    #[serde(flatten)]
    pub review: Review,
    pub user: FeedAuthor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<Value>,
}

impl RecentReview {
    pub fn new(source: ReviewWithAuthor, movie: Option<Value>) -> Self {
        Self {
            review: source.review,
            user: source.user.into(),
            movie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(with_image: bool) -> ReviewAuthorRow {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        ReviewAuthorRow {
            id: 10,
            user_id: 4,
            movie_id: "550".to_string(),
            rating: 5,
            comment: "Obra maestra".to_string(),
            created_at: at,
            updated_at: at,
            author_username: "leo".to_string(),
            author_name: None,
            author_image_id: with_image.then_some(1),
            author_image_url: with_image.then(|| "/uploads/avatars/avatar1.jpeg".to_string()),
            author_image_label: with_image.then(|| "Avatar 1".to_string()),
        }
    }

    #[test]
    fn nests_author_under_user() {
        let value = serde_json::to_value(ReviewWithAuthor::from(row(true))).unwrap();
        assert_eq!(value["movieId"], "550");
        assert_eq!(value["userId"], 4);
        assert_eq!(
            value["user"],
            json!({
                "id": 4,
                "username": "leo",
                "name": null,
                "profileImage": { "id": 1, "url": "/uploads/avatars/avatar1.jpeg", "label": "Avatar 1" }
            })
        );
    }

    #[test]
    fn recent_review_omits_missing_movie() {
        let recent = RecentReview::new(ReviewWithAuthor::from(row(false)), None);
        let value = serde_json::to_value(recent).unwrap();
        assert!(value.get("movie").is_none());
        assert_eq!(value["user"]["profileImage"], serde_json::Value::Null);
    }

    #[test]
    fn recent_review_author_carries_only_image_url() {
        let recent = RecentReview::new(
            ReviewWithAuthor::from(row(true)),
            Some(json!({ "title": "Fight Club", "poster_path": "/fc.jpg" })),
        );
        let value = serde_json::to_value(recent).unwrap();
        assert_eq!(value["id"], 10);
        assert_eq!(
            value["user"],
            json!({
                "id": 4,
                "name": null,
                "username": "leo",
                "profileImage": { "url": "/uploads/avatars/avatar1.jpeg" }
            })
        );
        assert_eq!(value["movie"]["title"], "Fight Club");
    }
}
