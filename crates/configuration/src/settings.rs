use crate::error::ConfigError;
use serde::Deserialize;

/// Listen on loopback only unless told otherwise. Use `0.0.0.0` in containers.
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// The root configuration structure for the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Postgres connection string, e.g. `postgresql://user:pass@db:5432/cim`.
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// The `host:port` string the HTTP listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "DATABASE_URL must be set.".to_string(),
            ));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("HOST must not be empty.".to_string()));
        }
        Ok(())
    }
}
