use std::env;
use thiserror::Error;

/// Secret used when running the development profile without `JWT_SECRET`.
/// Tokens signed with it are forgeable by anyone who has read this file.
pub const DEVELOPMENT_JWT_SECRET: &str = "cineteca-development-secret";

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Checked when the pool is created, so token tooling runs without it.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Exposes the avatar and test-user seeding endpoints.
    pub enable_seed_routes: bool,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Secret,
    /// True when `jwt_secret` is the development fallback.
    pub jwt_secret_is_fallback: bool,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: Option<Secret>,
    pub base_url: String,
    pub language: String,
    pub timeout_secs: u64,
}

/// String that never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(**redacted**)")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in the {0:?} environment (APP_ENV=development allows a built-in secret)")]
    MissingSecret(Environment),

    #[error("JWT_SECRET is set but empty")]
    EmptySecret,

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Profile defaults come first,
    /// individual variables override them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = lookup("APP_ENV");
        let environment = match profile.as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };
        // The fallback secret needs APP_ENV=development spelled out.
        let development_opt_in = matches!(profile.as_deref(), Some("development") | Some("dev"));

        let (jwt_secret, jwt_secret_is_fallback) = match lookup("JWT_SECRET") {
            Some(s) if s.is_empty() => return Err(ConfigError::EmptySecret),
            Some(s) => (Secret::new(s), false),
            None if development_opt_in => (Secret::new(DEVELOPMENT_JWT_SECRET), true),
            None => return Err(ConfigError::MissingSecret(environment)),
        };

        let mut config = match environment {
            Environment::Production => Self::production(jwt_secret),
            Environment::Staging => Self::staging(jwt_secret),
            Environment::Development => Self::development(jwt_secret),
        };
        config.security.jwt_secret_is_fallback = jwt_secret_is_fallback;
        config.with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server
        if let Some(v) = lookup("CINETECA_API_PORT").or_else(|| lookup("PORT")) {
            self.server.port = parse("PORT", v)?;
        }

        // Database
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse("DATABASE_CONNECTION_TIMEOUT", v)?;
        }

        // API
        if let Some(v) = lookup("API_ENABLE_SEED_ROUTES") {
            self.api.enable_seed_routes = parse("API_ENABLE_SEED_ROUTES", v)?;
        }

        // Security
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // TMDB
        if let Some(v) = lookup("TMDB_API_KEY").filter(|v| !v.is_empty()) {
            self.tmdb.api_key = Some(Secret::new(v));
        }
        if let Some(v) = lookup("TMDB_BASE_URL") {
            self.tmdb.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("TMDB_LANGUAGE") {
            self.tmdb.language = v;
        }
        if let Some(v) = lookup("TMDB_TIMEOUT_SECS") {
            self.tmdb.timeout_secs = parse("TMDB_TIMEOUT_SECS", v)?;
        }

        Ok(self)
    }

    fn development(jwt_secret: Secret) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                enable_seed_routes: true,
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_secret_is_fallback: false,
                cors_origins: Vec::new(),
            },
            tmdb: TmdbConfig::defaults(),
        }
    }

    fn staging(jwt_secret: Secret) -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                enable_seed_routes: true,
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_secret_is_fallback: false,
                cors_origins: Vec::new(),
            },
            tmdb: TmdbConfig::defaults(),
        }
    }

    fn production(jwt_secret: Secret) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                enable_seed_routes: false,
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_secret_is_fallback: false,
                cors_origins: Vec::new(),
            },
            tmdb: TmdbConfig::defaults(),
        }
    }
}

impl TmdbConfig {
    fn defaults() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            language: "es-ES".to_string(),
            timeout_secs: 10,
        }
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}
