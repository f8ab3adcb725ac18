//! Process configuration, read once at startup.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use interfaces_github_search::index::{
    GitHubSearchSettings, DEFAULT_API_URL, DEFAULT_MIN_STARS, DEFAULT_TIMEOUT,
};
use thiserror::Error;

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MissingVar: {name} must be set")]
    MissingVar { name: &'static str },

    #[error("InvalidVar: {name}={value:?}: {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_pool_size: u32,
    pub auth_user: String,
    pub auth_pass: String,
    pub bind_addr: SocketAddr,
    pub github_api_url: String,
    pub github_token: Option<String>,
    pub github_min_stars: u64,
    pub fetch_timeout: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::MissingVar { name });

        let fetch_timeout_secs: u64 =
            parse_or(get("FETCH_TIMEOUT_SECS"), "FETCH_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?;
        if fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidVar {
                name: "FETCH_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        let database_pool_size: u32 =
            parse_or(get("DATABASE_POOL_SIZE"), "DATABASE_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        if database_pool_size == 0 {
            return Err(ConfigError::InvalidVar {
                name: "DATABASE_POOL_SIZE",
                value: "0".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_pool_size,
            auth_user: required("AUTH_USER")?,
            auth_pass: required("AUTH_PASS")?,
            bind_addr: parse_or(
                get("BIND_ADDR"),
                "BIND_ADDR",
                SocketAddr::from(([0, 0, 0, 0], 8000)),
            )?,
            github_api_url: get("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            github_token: get("GITHUB_TOKEN"),
            github_min_stars: parse_or(get("GITHUB_MIN_STARS"), "GITHUB_MIN_STARS", DEFAULT_MIN_STARS)?,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    pub fn github_search_settings(&self) -> GitHubSearchSettings {
        GitHubSearchSettings {
            api_url: self.github_api_url.clone(),
            token: self.github_token.clone(),
            min_stars: self.github_min_stars,
            timeout: self.fetch_timeout,
        }
    }
}

fn parse_or<T>(value: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::InvalidVar {
            name,
            value: raw,
            reason: err.to_string(),
        }),
    }
}

// Keeps secrets out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("database_pool_size", &self.database_pool_size)
            .field("auth_user", &self.auth_user)
            .field("auth_pass", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("github_api_url", &self.github_api_url)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("github_min_stars", &self.github_min_stars)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}
