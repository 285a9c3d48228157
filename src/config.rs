use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

// Everything the server reads from the environment (.env included)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub upload_body_limit_bytes: usize,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub ping_message: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| "sqlite://wedding.db".to_string()),
            db_max_connections: parsed("DB_MAX_CONNECTIONS", 5)?,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed("PORT", 8080)?,
            upload_dir: var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/uploads")),
            upload_body_limit_bytes: parsed("UPLOAD_BODY_LIMIT_BYTES", 256 * 1024 * 1024)?,
            jwt_secret,
            jwt_ttl_hours: parsed("JWT_TTL_HOURS", 24)?,
            admin_username: var("ADMIN_USERNAME"),
            admin_password: var("ADMIN_PASSWORD"),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or_default(),
            ping_message: var("PING_MESSAGE").unwrap_or_else(|| "ping".to_string()),
        })
    }

    /// Configuration for tests and embedded use: in-memory store, no CORS restriction.
    pub fn in_memory(upload_dir: impl Into<PathBuf>, jwt_secret: &str) -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            upload_dir: upload_dir.into(),
            upload_body_limit_bytes: 16 * 1024 * 1024,
            jwt_secret: jwt_secret.to_string(),
            jwt_ttl_hours: 1,
            admin_username: None,
            admin_password: None,
            cors_allowed_origins: Vec::new(),
            ping_message: "ping".to_string(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Empty values count as unset
fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        let origins = split_origins(" https://a.example , ,https://b.example,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn in_memory_config_pins_a_single_connection() {
        let cfg = AppConfig::in_memory("/tmp/uploads", "secret");
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.db_max_connections, 1);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:0");
    }
}
