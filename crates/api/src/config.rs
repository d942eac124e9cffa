use std::str::FromStr;

use lucky_six_core::schedule::DEFAULT_DRAW_INTERVAL_SECS;

/// Errors raised while reading configuration at start-up.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Where draws and the schedule row are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store_backend: StoreBackend,
    /// Only `None` with the in-memory backend.
    pub database_url: Option<String>,
    /// Bearer token required by `POST /api/draws`.
    pub service_role_key: String,
    /// Interval written into a newly created schedule row.
    pub draw_interval_secs: i64,
    pub draw_scheduler_enabled: bool,
    /// Upper bound on one lucky-number request.
    pub lucky_numbers_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:9002` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `STORE_BACKEND`              | `postgres`              |
    /// | `DATABASE_URL`               | required for postgres   |
    /// | `SERVICE_ROLE_KEY`           | required                |
    /// | `DRAW_INTERVAL_SECS`         | `180`                   |
    /// | `DRAW_SCHEDULER_ENABLED`     | `true`                  |
    /// | `LUCKY_NUMBERS_TIMEOUT_SECS` | `10`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&var, "PORT", 3000u16)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:9002".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&var, "REQUEST_TIMEOUT_SECS", 30u64)?;

        let store_backend = match var("STORE_BACKEND") {
            None => StoreBackend::Postgres,
            Some(value) => value.parse().map_err(|()| ConfigError::Invalid {
                name: "STORE_BACKEND",
                value,
            })?,
        };

        let database_url = var("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let service_role_key =
            var("SERVICE_ROLE_KEY").ok_or(ConfigError::Missing("SERVICE_ROLE_KEY"))?;

        let draw_interval_secs = parse_or(&var, "DRAW_INTERVAL_SECS", DEFAULT_DRAW_INTERVAL_SECS)?;
        if draw_interval_secs <= 0 {
            return Err(ConfigError::Invalid {
                name: "DRAW_INTERVAL_SECS",
                value: draw_interval_secs.to_string(),
            });
        }

        let draw_scheduler_enabled = parse_or(&var, "DRAW_SCHEDULER_ENABLED", true)?;
        let lucky_numbers_timeout_secs = parse_or(&var, "LUCKY_NUMBERS_TIMEOUT_SECS", 10u64)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_backend,
            database_url,
            service_role_key,
            draw_interval_secs,
            draw_scheduler_enabled,
            lucky_numbers_timeout_secs,
        })
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/lucky_six"),
            ("SERVICE_ROLE_KEY", "secret"),
        ])
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:9002"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.draw_interval_secs, 180);
        assert!(config.draw_scheduler_enabled);
        assert_eq!(config.lucky_numbers_timeout_secs, 10);
    }

    #[test]
    fn missing_service_role_key_is_named() {
        let err = load(&[("DATABASE_URL", "postgres://localhost/lucky_six")]).unwrap_err();
        assert_matches!(err, ConfigError::Missing("SERVICE_ROLE_KEY"));
        assert_eq!(err.to_string(), "SERVICE_ROLE_KEY must be set");
    }

    #[test]
    fn missing_database_url_is_named() {
        let err = load(&[("SERVICE_ROLE_KEY", "secret")]).unwrap_err();
        assert_matches!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn memory_backend_does_not_need_database_url() {
        let config = load(&[("STORE_BACKEND", "memory"), ("SERVICE_ROLE_KEY", "secret")]).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = load(&[("DATABASE_URL", "postgres://x"), ("SERVICE_ROLE_KEY", "  ")]).unwrap_err();
        assert_matches!(err, ConfigError::Missing("SERVICE_ROLE_KEY"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load(&[
            ("DATABASE_URL", "postgres://x"),
            ("SERVICE_ROLE_KEY", "secret"),
            ("PORT", "eighty"),
        ])
        .unwrap_err();
        assert_matches!(err, ConfigError::Invalid { name: "PORT", .. });
    }

    #[test]
    fn unknown_store_backend_is_rejected() {
        let err = load(&[("SERVICE_ROLE_KEY", "secret"), ("STORE_BACKEND", "redis")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { name: "STORE_BACKEND", .. });
    }

    #[test]
    fn non_positive_interval_is_rejected() {
        let err = load(&[
            ("STORE_BACKEND", "memory"),
            ("SERVICE_ROLE_KEY", "secret"),
            ("DRAW_INTERVAL_SECS", "0"),
        ])
        .unwrap_err();
        assert_matches!(err, ConfigError::Invalid { name: "DRAW_INTERVAL_SECS", .. });
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[
            ("STORE_BACKEND", "memory"),
            ("SERVICE_ROLE_KEY", "secret"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,,"),
            ("DRAW_SCHEDULER_ENABLED", "false"),
        ])
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert!(!config.draw_scheduler_enabled);
    }
}
