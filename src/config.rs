use std::env;
use std::time::Duration;

use log::warn;
use thiserror::Error;

use crate::auth::token::SigningKey;

/// Token lifetime used when `TOKEN_TTL` is absent or unparsable.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Longest accepted `TOKEN_TTL`: one year.
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} must be a valid number")]
    InvalidNumber(&'static str),
    #[error("JWT_SECRET must not be empty")]
    EmptySecret,
    #[error("TOKEN_TTL must be greater than zero")]
    ZeroTokenTtl,
    #[error("TOKEN_TTL must not exceed {0} seconds")]
    TokenTtlTooLong(u64),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub signing_key: SigningKey,
    pub token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("SERVER_PORT"))?,
            None => 8080,
        };
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let token_ttl = parse_token_ttl(lookup("TOKEN_TTL").as_deref());
        if token_ttl.is_zero() {
            return Err(ConfigError::ZeroTokenTtl);
        }
        if token_ttl > MAX_TOKEN_TTL {
            return Err(ConfigError::TokenTtlTooLong(MAX_TOKEN_TTL.as_secs()));
        }

        Ok(Self {
            database_url,
            server_port,
            server_host,
            signing_key: SigningKey::new(secret),
            token_ttl,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

/// Parses a TTL given in whole seconds.
///
/// Absent or malformed values fall back to [`DEFAULT_TOKEN_TTL`] so that minting never
/// fails on configuration; an explicit `0` is returned as-is for the caller to reject.
pub fn parse_token_ttl(raw: Option<&str>) -> Duration {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_TOKEN_TTL,
        Some(value) => match value.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "TOKEN_TTL {:?} is not a number of seconds, using default of {}s",
                    value,
                    DEFAULT_TOKEN_TTL.as_secs()
                );
                DEFAULT_TOKEN_TTL
            }
        },
    }
}
