// src/config.rs
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use http::HeaderValue;
use tracing::info;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Load the example polls and form on startup.
    pub seed_examples: bool,
    /// Allowed CORS origin. Any origin when unset.
    pub cors_origin: Option<HeaderValue>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3030,
            seed_examples: true,
            cors_origin: None,
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: parse_or("HOST", &lookup, defaults.host)?,
            port: parse_or("PORT", &lookup, defaults.port)?,
            seed_examples: parse_flag("SEED_EXAMPLES", &lookup, defaults.seed_examples)?,
            cors_origin: parse_origin("CORS_ORIGIN", &lookup)?,
        })
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::InvalidValue {
                key,
                value,
                reason: e.to_string(),
            })
        }
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn parse_flag<F>(key: &'static str, lookup: &F, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value,
            reason: "expected true or false".to_string(),
        }),
    }
}

fn parse_origin<F>(key: &'static str, lookup: &F) -> Result<Option<HeaderValue>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    let parsed = HeaderValue::from_str(value.trim());
    parsed.map(Some).map_err(|e| ConfigError::InvalidValue {
        key,
        value,
        reason: e.to_string(),
    })
}
