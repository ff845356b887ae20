use sqlx::PgPool;
use tracing::info;

use super::avatars;
use super::manager::DatabaseError;
use super::models::User;
use super::users::{self, NewUser};

pub const DEFAULT_AVATARS: [&str; 3] = [
    "/uploads/avatars/avatar1.jpeg",
    "/uploads/avatars/avatar2.jpeg",
    "/uploads/avatars/avatar3.jpeg",
];

pub const TEST_USER_EMAIL: &str = "prueba";
pub const TEST_USER_USERNAME: &str = "prueba";
pub const TEST_USER_PASSWORD: &str = "prueba";
pub const TEST_USER_NAME: &str = "Prueba";

pub fn avatar_label(index: usize) -> String {
    format!("Avatar {}", index + 1)
}

/// Idempotently installs the bundled avatars; returns how many were processed.
pub async fn seed_avatars(pool: &PgPool) -> Result<usize, DatabaseError> {
    for (i, url) in DEFAULT_AVATARS.iter().enumerate() {
        avatars::ensure(pool, url, &avatar_label(i)).await?;
    }
    info!("Seeded {} avatars", DEFAULT_AVATARS.len());
    Ok(DEFAULT_AVATARS.len())
}

pub async fn find_test_user(pool: &PgPool) -> Result<Option<User>, DatabaseError> {
    users::find_by_email(pool, TEST_USER_EMAIL).await
}

/// Creates the `prueba` account; `password_hash` must hash [`TEST_USER_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, password_hash: String) -> Result<User, DatabaseError> {
    let user = users::create(
        pool,
        &NewUser {
            email: TEST_USER_EMAIL.to_string(),
            username: TEST_USER_USERNAME.to_string(),
            password_hash,
            name: Some(TEST_USER_NAME.to_string()),
        },
    )
    .await?;
    info!("Created test user {}", user.id);
    Ok(user)
}
