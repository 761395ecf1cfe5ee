/*
 * Responsibility
 * - Load env-driven settings (DATABASE_URL, VALKEY_URL, listener, ...)
 * - Validate them up front (missing config fails startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub valkey_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // Domain name of the default user store.
    pub user_store_domain: String,

    // Dispatch-order override for the revocation listener; the handler
    // falls back to its built-in priority when unset.
    pub revocation_priority: Option<i32>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let valkey_url =
            std::env::var("VALKEY_URL").map_err(|_| ConfigError::Missing("VALKEY_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let user_store_domain =
            std::env::var("USER_STORE_DOMAIN").unwrap_or_else(|_| "PRIMARY".to_string());

        let revocation_priority = match std::env::var("REVOCATION_HANDLER_PRIORITY") {
            Ok(v) => Some(
                v.parse::<i32>()
                    .map_err(|_| ConfigError::Invalid("REVOCATION_HANDLER_PRIORITY"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            addr,
            database_url,
            valkey_url,
            app_env,
            cors_allowed_origins,
            user_store_domain,
            revocation_priority,
        })
    }
}
