use serde::Serialize;
use sqlx::FromRow;

/// Entry in the avatar picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct AvatarItem {
    pub id: i64,
    pub url: String,
    pub label: Option<String>,
}
