use clap::Subcommand;
use serde_json::json;

use crate::auth::password::hash_password;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::seed::{self, TEST_USER_PASSWORD};
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Apply pending migrations")]
    Migrate,

    #[command(about = "Install the bundled avatars and the shared test user")]
    Seed,
}

pub async fn handle(
    cmd: DbCommands,
    config: &AppConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database).await?;

    match cmd {
        DbCommands::Migrate => {
            DatabaseManager::migrate(&pool).await?;
            output_success(&output_format, "Migrations applied", None)
        }
        DbCommands::Seed => {
            let avatars = seed::seed_avatars(&pool).await?;

            let (user, created) = match seed::find_test_user(&pool).await? {
                Some(user) => (user, false),
                None => {
                    let hash = hash_password(TEST_USER_PASSWORD.to_string()).await?;
                    (seed::create_test_user(&pool, hash).await?, true)
                }
            };

            output_success(
                &output_format,
                &format!(
                    "Seeded {} avatars; test user {} {}",
                    avatars,
                    user.username,
                    if created { "created" } else { "already existed" }
                ),
                Some(json!({
                    "avatars": avatars,
                    "test_user": { "id": user.id, "created": created }
                })),
            )
        }
    }
}
