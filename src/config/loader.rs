//! Configuration loading from disk and environment.

use std::path::Path;
use std::fs;
use crate::config::schema::HubConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream session cookie.
pub const AUTH_COOKIE_ENV: &str = "BLASEBALL_AUTH_COOKIE";

/// Environment variable overriding the listener bind address.
pub const BIND_ADDRESS_ENV: &str = "SPLORTSHUB_BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<HubConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => HubConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay values taken from `lookup` (normally the process environment).
pub fn apply_env_overrides<F>(config: &mut HubConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(cookie) = lookup(AUTH_COOKIE_ENV).filter(|v| !v.is_empty()) {
        config.upstream.auth_cookie = cookie;
    }
    if let Some(addr) = lookup(BIND_ADDRESS_ENV).filter(|v| !v.is_empty()) {
        config.listener.bind_address = addr;
    }
}
