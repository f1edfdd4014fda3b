//! Record store configuration.
//!
//! # Responsibility
//! - Collect store credentials from the environment exactly once, at process
//!   start, into an explicit struct.
//! - Keep credential reads out of per-call data access code.
//!
//! # Invariants
//! - `host`, `database`, `user` and `password` are required and non-blank.
//! - `port` is optional and defaults to the store's standard port.
//! - Debug output never exposes the password.
//!
//! # See also
//! - docs/architecture/data-access.md

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Environment variable holding the store host name.
pub const ENV_HOST: &str = "host";
/// Environment variable holding the database name.
pub const ENV_DATABASE: &str = "database";
/// Environment variable holding the store user.
pub const ENV_USER: &str = "user";
/// Environment variable holding the store password.
pub const ENV_PASSWORD: &str = "password";
/// Optional environment variable overriding the store port.
pub const ENV_PORT: &str = "port";

const DEFAULT_PORT: u16 = 5432;

/// Credentials and endpoint for the external process record store.
///
/// Constructed once at process start and passed by reference into the
/// repository constructor; data access code never reads the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store host name or address.
    pub host: String,
    /// TCP port, `5432` unless overridden.
    pub port: u16,
    /// Database name.
    pub database: String,
    /// Login role.
    pub user: String,
    /// Login password. Redacted from Debug output.
    pub password: String,
}

/// Error raised while assembling [`StoreConfig`] from the environment.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set at all.
    MissingVar(&'static str),
    /// A required variable is set but empty or whitespace-only.
    BlankVar(&'static str),
    /// The optional port variable is present but not a valid TCP port.
    InvalidPort(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => {
                write!(f, "missing required environment variable `{name}`")
            }
            Self::BlankVar(name) => {
                write!(f, "environment variable `{name}` is set but blank")
            }
            Self::InvalidPort(value) => {
                write!(f, "invalid store port `{value}`: expected 1-65535")
            }
        }
    }
}

impl Error for ConfigError {}

impl StoreConfig {
    /// Builds the configuration from process environment variables.
    ///
    /// Reads `host`, `database`, `user`, `password` (required) and `port`
    /// (optional). Call this once at startup, before constructing the
    /// repository.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`] / [`ConfigError::BlankVar`] for absent
    ///   or blank required variables.
    /// - [`ConfigError::InvalidPort`] when `port` is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = required(&lookup, ENV_HOST)?;
        let database = required(&lookup, ENV_DATABASE)?;
        let user = required(&lookup, ENV_USER)?;
        let password = match lookup(ENV_PASSWORD) {
            None => return Err(ConfigError::MissingVar(ENV_PASSWORD)),
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::BlankVar(ENV_PASSWORD));
            }
            // The password is used verbatim; trimming could corrupt it.
            Some(value) => value,
        };
        let port = match lookup(ENV_PORT) {
            None => DEFAULT_PORT,
            Some(value) => parse_port(&value)?,
        };

        Ok(Self {
            host,
            port,
            database,
            user,
            password,
        })
    }
}

impl Debug for StoreConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    match lookup(name) {
        None => Err(ConfigError::MissingVar(name)),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ConfigError::BlankVar(name))
            } else {
                Ok(trimmed.to_string())
            }
        }
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    let trimmed = value.trim();
    match trimmed.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, ENV_PASSWORD, ENV_PORT, ENV_USER};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("host", "db.internal"),
            ("database", "ops"),
            ("user", "reader"),
            ("password", "s3cret"),
        ]
    }

    #[test]
    fn builds_from_complete_environment_with_default_port() {
        let config = StoreConfig::from_lookup(lookup_from(&full_env())).unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "ops");
        assert_eq!(config.user, "reader");
        assert_eq!(config.password, "s3cret");
    }

    #[test]
    fn port_override_is_honored() {
        let mut env = full_env();
        env.push((ENV_PORT, "6432"));
        let config = StoreConfig::from_lookup(lookup_from(&env)).unwrap();
        assert_eq!(config.port, 6432);
    }

    #[test]
    fn missing_variable_is_reported_by_name() {
        let env: Vec<_> = full_env()
            .into_iter()
            .filter(|(name, _)| *name != ENV_USER)
            .collect();
        let err = StoreConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(ENV_USER));
    }

    #[test]
    fn blank_variable_is_rejected() {
        let mut env = full_env();
        for entry in env.iter_mut() {
            if entry.0 == ENV_PASSWORD {
                entry.1 = "   ";
            }
        }
        let err = StoreConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(err, ConfigError::BlankVar(ENV_PASSWORD));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut env = full_env();
        env.push((ENV_PORT, "not-a-port"));
        let err = StoreConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }

    #[test]
    fn host_whitespace_is_trimmed_but_password_is_kept_verbatim() {
        let mut env = full_env();
        for entry in env.iter_mut() {
            match entry.0 {
                "host" => entry.1 = "  db.internal  ",
                "password" => entry.1 = " spaced secret ",
                _ => {}
            }
        }
        let config = StoreConfig::from_lookup(lookup_from(&env)).unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.password, " spaced secret ");
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = StoreConfig::from_lookup(lookup_from(&full_env())).unwrap();
        let rendered = format!("{config:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("s3cret"));
    }
}
