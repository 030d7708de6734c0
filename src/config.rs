use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DATABASE_URL_VAR: &str = "APP_ORDERS_SERVICE_DB";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_db_connections: u32,
    pub request_timeout: Duration,
    pub keep_alive: Duration,
    pub disconnect_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;

        let max_db_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 50u32)?;
        if max_db_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        Ok(Config {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 9000)?,
            max_db_connections,
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "HTTP_REQUEST_TIMEOUT_SECS",
                15,
            )?),
            keep_alive: Duration::from_secs(parse_or(&lookup, "HTTP_KEEP_ALIVE_SECS", 60)?),
            disconnect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "HTTP_DISCONNECT_TIMEOUT_SECS",
                15,
            )?),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn database_url_is_required() {
        assert_eq!(
            config_from(&[]),
            Err(ConfigError::Missing(DATABASE_URL_VAR))
        );
        assert_eq!(
            config_from(&[(DATABASE_URL_VAR, "  ")]),
            Err(ConfigError::Missing(DATABASE_URL_VAR))
        );
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = config_from(&[(DATABASE_URL_VAR, "postgres://localhost/orders")]).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/orders");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_db_connections, 50);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.keep_alive, Duration::from_secs(60));
        assert_eq!(config.disconnect_timeout, Duration::from_secs(15));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            (DATABASE_URL_VAR, "postgres://db/orders"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("DB_MAX_CONNECTIONS", "5"),
            ("HTTP_KEEP_ALIVE_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8081);
        assert_eq!(config.max_db_connections, 5);
        assert_eq!(config.keep_alive, Duration::from_secs(5));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert_eq!(
            config_from(&[(DATABASE_URL_VAR, "postgres://db"), ("PORT", "http")]),
            Err(ConfigError::Invalid {
                key: "PORT",
                value: "http".to_string()
            })
        );
        assert!(matches!(
            config_from(&[(DATABASE_URL_VAR, "postgres://db"), ("DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                ..
            })
        ));
    }
}
