use crate::error::ConfigError;
use std::collections::HashMap;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DEFAULT_HOST, DEFAULT_PORT, Settings};

/// Loads the service settings from the process environment.
///
/// `DATABASE_URL` is required; `HOST` and `PORT` fall back to a loopback-only
/// listener on port 8080. Callers that want a `.env` file honoured should load
/// it (e.g. with `dotenvy`) before calling this.
pub fn load_settings() -> Result<Settings, ConfigError> {
    build(config::Environment::default())
}

/// Same as [`load_settings`], but reads from an explicit set of variables
/// instead of the process environment.
pub fn load_settings_from(vars: HashMap<String, String>) -> Result<Settings, ConfigError> {
    build(config::Environment::default().source(Some(vars)))
}

fn build(environment: config::Environment) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("host", DEFAULT_HOST)?
        .set_default("port", i64::from(DEFAULT_PORT))?
        .add_source(environment)
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn applies_defaults_for_host_and_port() {
        let settings =
            load_settings_from(vars(&[("DATABASE_URL", "postgres://u:p@localhost/cim")])).unwrap();
        assert_eq!(settings.database_url, "postgres://u:p@localhost/cim");
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.listen_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn reads_host_and_port_overrides() {
        let settings = load_settings_from(vars(&[
            ("DATABASE_URL", "postgres://localhost/cim"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(settings.listen_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(
            load_settings_from(HashMap::new()),
            Err(ConfigError::LoadError(_))
        ));
        assert!(matches!(
            load_settings_from(vars(&[("DATABASE_URL", " ")])),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_a_port_that_is_not_a_number() {
        let result = load_settings_from(vars(&[
            ("DATABASE_URL", "postgres://localhost/cim"),
            ("PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }
}
