use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::User;

const USER_SELECT: &str = r#"
    SELECT u.id, u.email, u.username, u.password, u.name, u.profile_image_id,
           pi.url AS profile_image_url, u.created_at, u.updated_at
    FROM users u
    LEFT JOIN profile_images pi ON pi.id = u.profile_image_id
"#;

/// Fields for a new account; `password_hash` is already bcrypt-hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
}

/// Partial profile update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub profile_image_id: Option<i64>,
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!("{} WHERE u.id = $1", USER_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!("{} WHERE u.email = $1", USER_SELECT))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn email_or_username_taken(
    pool: &PgPool,
    email: &str,
    username: &str,
) -> Result<bool, DatabaseError> {
    let (taken,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 OR username = $2)",
    )
    .bind(email)
    .bind(username)
    .fetch_one(pool)
    .await?;
    Ok(taken)
}

pub async fn create(pool: &PgPool, new_user: &NewUser) -> Result<User, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, username, password, name)
        VALUES ($1, $2, $3, $4)
        RETURNING id, email, username, password, name, profile_image_id,
                  NULL::TEXT AS profile_image_url, created_at, updated_at
        "#,
    )
    .bind(&new_user.email)
    .bind(&new_user.username)
    .bind(&new_user.password_hash)
    .bind(&new_user.name)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

/// Returns `None` when the user no longer exists.
pub async fn update_profile(
    pool: &PgPool,
    id: i64,
    changes: &ProfileChanges,
) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        WITH updated AS (
            UPDATE users
            SET name = COALESCE($2, name),
                profile_image_id = COALESCE($3, profile_image_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
        )
        SELECT u.id, u.email, u.username, u.password, u.name, u.profile_image_id,
               pi.url AS profile_image_url, u.created_at, u.updated_at
        FROM updated u
        LEFT JOIN profile_images pi ON pi.id = u.profile_image_id
        "#,
    )
    .bind(id)
    .bind(&changes.name)
    .bind(changes.profile_image_id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}
