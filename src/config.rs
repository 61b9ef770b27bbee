// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup into
//! immutable structs. A `.env` file in the working directory is loaded
//! first when present.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH0_DOMAIN` | Auth0 tenant hostname | Required |
//! | `API_AUDIENCE` | Expected JWT audience claim | Required |
//! | `AUTH_ALGORITHMS` | Comma-separated signing algorithm allow-list | `RS256` |
//! | `JWKS_TIMEOUT_SECS` | Timeout for one JWKS fetch | `5` |
//! | `AUTH_CLOCK_SKEW_SECS` | Leeway on token expiry (max 60) | `0` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::auth::jwks::{JwksClientError, DEFAULT_FETCH_TIMEOUT};
use crate::auth::verifier::{DEFAULT_ALGORITHMS, MAX_CLOCK_SKEW_LEEWAY};

pub const AUTH0_DOMAIN_ENV: &str = "AUTH0_DOMAIN";
pub const API_AUDIENCE_ENV: &str = "API_AUDIENCE";
pub const AUTH_ALGORITHMS_ENV: &str = "AUTH_ALGORITHMS";
pub const JWKS_TIMEOUT_SECS_ENV: &str = "JWKS_TIMEOUT_SECS";
pub const AUTH_CLOCK_SKEW_SECS_ENV: &str = "AUTH_CLOCK_SKEW_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Configuration errors, reported at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error(transparent)]
    JwksClient(#[from] JwksClientError),
}

/// Token verification settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    /// Auth0 tenant hostname, e.g. `my-tenant.eu.auth0.com`
    pub domain: String,
    /// Expected `aud`
    pub audience: String,
    /// Accepted signing algorithms
    pub algorithms: Vec<Algorithm>,
    /// Timeout for one JWKS fetch
    pub jwks_timeout: Duration,
    /// Leeway on `exp`, in seconds
    pub leeway: u64,
}

impl AuthConfig {
    pub fn new(domain: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            audience: audience.into(),
            algorithms: DEFAULT_ALGORITHMS.to_vec(),
            jwks_timeout: DEFAULT_FETCH_TIMEOUT,
            leeway: 0,
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let domain = required(&lookup, AUTH0_DOMAIN_ENV)?;
        validate_domain(&domain)?;
        let audience = required(&lookup, API_AUDIENCE_ENV)?;

        let mut config = Self::new(domain, audience);

        if let Some(list) = optional(&lookup, AUTH_ALGORITHMS_ENV) {
            config.algorithms = parse_algorithms(&list)?;
        }

        if let Some(secs) = optional(&lookup, JWKS_TIMEOUT_SECS_ENV) {
            let secs: u64 = parse_number(JWKS_TIMEOUT_SECS_ENV, &secs)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: JWKS_TIMEOUT_SECS_ENV,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.jwks_timeout = Duration::from_secs(secs);
        }

        if let Some(secs) = optional(&lookup, AUTH_CLOCK_SKEW_SECS_ENV) {
            let secs: u64 = parse_number(AUTH_CLOCK_SKEW_SECS_ENV, &secs)?;
            if secs > MAX_CLOCK_SKEW_LEEWAY {
                return Err(ConfigError::Invalid {
                    var: AUTH_CLOCK_SKEW_SECS_ENV,
                    reason: format!("must be at most {MAX_CLOCK_SKEW_LEEWAY}"),
                });
            }
            config.leeway = secs;
        }

        Ok(config)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = optional(&lookup, HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = optional(&lookup, PORT_ENV) {
            config.port = parse_number(PORT_ENV, &port)?;
        }
        if let Some(format) = optional(&lookup, LOG_FORMAT_ENV) {
            config.log_format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                other => {
                    return Err(ConfigError::Invalid {
                        var: LOG_FORMAT_ENV,
                        reason: format!("unknown format '{other}'"),
                    })
                }
            };
        }

        Ok(config)
    }

    /// Bind address as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String, ConfigError> {
    optional(lookup, var).ok_or(ConfigError::Missing(var))
}

fn parse_number<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}

/// The domain is a bare hostname; the scheme and paths are fixed.
fn validate_domain(domain: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        var: AUTH0_DOMAIN_ENV,
        reason: reason.to_string(),
    };

    if domain.contains("://") {
        return Err(invalid("expected a hostname without scheme"));
    }
    if domain.contains('/') {
        return Err(invalid("expected a hostname without path"));
    }
    url::Host::parse(domain).map_err(|e| invalid(&e.to_string()))?;
    Ok(())
}

fn parse_algorithms(list: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let algorithms = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| {
            Algorithm::from_str(name).map_err(|_| ConfigError::Invalid {
                var: AUTH_ALGORITHMS_ENV,
                reason: format!("unknown algorithm '{name}'"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if algorithms.is_empty() {
        return Err(ConfigError::Invalid {
            var: AUTH_ALGORITHMS_ENV,
            reason: "allow-list is empty".to_string(),
        });
    }
    Ok(algorithms)
}
