use chrono::Duration;
use clap::Subcommand;
use serde_json::json;

use crate::auth::{TokenCodec, TokenError, TOKEN_TTL_HOURS};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Sign a token for a user id with the configured secret")]
    Issue {
        #[arg(help = "User id (token subject)")]
        user_id: i64,
        #[arg(long, default_value_t = TOKEN_TTL_HOURS, help = "Lifetime in hours")]
        ttl_hours: i64,
    },

    #[command(about = "Check a token and print its subject")]
    Verify {
        #[arg(help = "Token to verify")]
        token: String,
    },
}

/// Short machine-readable name for a verification failure.
pub fn failure_code(err: &TokenError) -> &'static str {
    match err {
        TokenError::InvalidSignature => "INVALID_SIGNATURE",
        TokenError::Expired => "EXPIRED",
        TokenError::Malformed(_) => "MALFORMED",
        TokenError::EmptySecret => "EMPTY_SECRET",
        TokenError::Generation(_) => "GENERATION_FAILED",
    }
}

pub fn handle(
    cmd: TokenCommands,
    config: &AppConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    if config.security.jwt_secret_is_fallback {
        tracing::warn!("JWT_SECRET not set; using the development secret");
    }
    let codec = TokenCodec::new(config.security.jwt_secret.expose())?;

    match cmd {
        TokenCommands::Issue { user_id, ttl_hours } => {
            let ttl = Duration::try_hours(ttl_hours)
                .filter(|ttl| *ttl > Duration::zero())
                .ok_or_else(|| anyhow::anyhow!("--ttl-hours must be a positive number of hours"))?;
            let token = codec.issue(user_id, ttl)?;
            match output_format {
                OutputFormat::Text => println!("{}", token),
                OutputFormat::Json => output_success(
                    &output_format,
                    "Token issued",
                    Some(json!({ "token": token, "user_id": user_id, "ttl_hours": ttl_hours })),
                )?,
            }
            Ok(())
        }
        TokenCommands::Verify { token } => match codec.verify(token.trim()) {
            Ok(user_id) => output_success(
                &output_format,
                &format!("Token valid for user {}", user_id),
                Some(json!({ "user_id": user_id })),
            ),
            Err(e) => Err(anyhow::anyhow!("{} ({})", e, failure_code(&e))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::from_lookup(|key| (key == "JWT_SECRET").then(|| "cli-secret".to_string()))
            .unwrap()
    }

    #[test]
    fn oversized_ttl_is_an_error() {
        let cmd = TokenCommands::Issue { user_id: 1, ttl_hours: 3_000_000_000 };
        assert!(handle(cmd, &config(), OutputFormat::Text).is_err());
    }

    #[test]
    fn non_positive_ttl_is_an_error() {
        let cmd = TokenCommands::Issue { user_id: 1, ttl_hours: 0 };
        assert!(handle(cmd, &config(), OutputFormat::Text).is_err());
    }

    #[test]
    fn bad_token_reports_failure_code() {
        let cmd = TokenCommands::Verify { token: "not.a.token".to_string() };
        let err = handle(cmd, &config(), OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("MALFORMED"));
    }
}
