use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::AvatarItem;

/// Active avatars for the picker, in id order.
pub async fn list_active(pool: &PgPool) -> Result<Vec<AvatarItem>, DatabaseError> {
    let items = sqlx::query_as::<_, AvatarItem>(
        "SELECT id, url, label FROM profile_images WHERE is_active = TRUE ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Insert an active avatar unless one with the same URL exists.
pub async fn ensure(pool: &PgPool, url: &str, label: &str) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"
        INSERT INTO profile_images (url, label, is_active)
        VALUES ($1, $2, TRUE)
        ON CONFLICT (url) DO NOTHING
        "#,
    )
    .bind(url)
    .bind(label)
    .execute(pool)
    .await?;
    Ok(())
}
