use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Stored account, joined with the URL of its selected avatar.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// bcrypt hash
    pub password: String,
    pub name: Option<String>,
    pub profile_image_id: Option<i64>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileImageRef {
    pub id: i64,
    pub url: String,
}

/// Public view of a user returned by the auth endpoints. Never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: Option<String>,
    pub profile_image_id: Option<i64>,
    pub profile_image: Option<ProfileImageRef>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        let profile_image = match (user.profile_image_id, &user.profile_image_url) {
            (Some(id), Some(url)) => Some(ProfileImageRef { id, url: url.clone() }),
            _ => None,
        };

        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            profile_image_id: user.profile_image_id,
            profile_image,
        }
    }
}
