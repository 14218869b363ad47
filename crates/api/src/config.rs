use std::env;
use std::str::FromStr;

use tokatsu_core::auth::AdminAccount;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where content rows live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// In-process, lost on restart. For demos and local UI work.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    pub store_backend: StoreBackend,
    /// PostgreSQL connection URL. Required for the Postgres backend.
    pub database_url: Option<String>,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// Session token signing secret.
    pub jwt_secret: String,
    /// Session lifetime in seconds.
    pub session_ttl_secs: i64,
    pub admin: AdminAccount,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parsed<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_backend = parsed("STORE_BACKEND", StoreBackend::Postgres)?;
        let database_url = match store_backend {
            StoreBackend::Postgres => Some(required("DATABASE_URL")?),
            StoreBackend::Memory => env::var("DATABASE_URL").ok(),
        };

        let session_ttl_secs = parsed("SESSION_TTL_SECS", 86_400_i64)?;
        if session_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                name: "SESSION_TTL_SECS",
                value: session_ttl_secs.to_string(),
            });
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed("PORT", 3030)?,
            store_backend,
            database_url,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", 20)?,
            db_min_connections: parsed("DB_MIN_CONNECTIONS", 5)?,
            jwt_secret: required("JWT_SECRET")?,
            session_ttl_secs,
            admin: AdminAccount {
                email: required("ADMIN_EMAIL")?,
                password_hash: required("ADMIN_PASSWORD_HASH")?,
                display_name: env::var("ADMIN_DISPLAY_NAME").ok(),
            },
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!("postgres".parse(), Ok(StoreBackend::Postgres));
        assert_eq!(" Memory ".parse(), Ok(StoreBackend::Memory));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn addr_joins_host_and_port() {
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 8080,
            store_backend: StoreBackend::Memory,
            database_url: None,
            db_max_connections: 1,
            db_min_connections: 1,
            jwt_secret: "s".into(),
            session_ttl_secs: 60,
            admin: AdminAccount {
                email: "a@b.c".into(),
                password_hash: String::new(),
                display_name: None,
            },
            log_level: "info".into(),
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.session_ttl(), chrono::Duration::seconds(60));
    }
}
