//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, TTLs > 0, capacity > 0)
//! - Check addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HubConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::HubConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.auth_cookie is empty (set it in the config file or BLASEBALL_AUTH_COOKIE)")]
    MissingAuthCookie,

    #[error("upstream.base_url '{0}' is not a valid URL")]
    InvalidBaseUrl(String),

    #[error("{field} '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("retries.base_delay_ms ({base}) exceeds retries.max_delay_ms ({max})")]
    BackoffInverted { base: u64, max: u64 },
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &HubConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream.auth_cookie.trim().is_empty() {
        errors.push(ValidationError::MissingAuthCookie);
    }
    if Url::parse(&config.upstream.base_url).is_err() {
        errors.push(ValidationError::InvalidBaseUrl(config.upstream.base_url.clone()));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let positive = [
        ("upstream.request_timeout_secs", config.upstream.request_timeout_secs),
        ("retries.max_elapsed_ms", config.retries.max_elapsed_ms),
        ("cache.teams_ttl_secs", config.cache.teams_ttl_secs),
        ("cache.team_ttl_secs", config.cache.team_ttl_secs),
        ("cache.team_capacity", config.cache.team_capacity as u64),
        ("cache.players_ttl_secs", config.cache.players_ttl_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::Zero(field));
        }
    }

    if config.retries.base_delay_ms > config.retries.max_delay_ms {
        errors.push(ValidationError::BackoffInverted {
            base: config.retries.base_delay_ms,
            max: config.retries.max_delay_ms,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
