// src/config.rs
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_API_VERSION: &str = "1.0.0";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Upstream base URL without a trailing slash.
    pub api_url: String,
    pub api_key: String,
    pub api_version: String,
    pub public_dir: PathBuf,
    pub upstream_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = parse("HOST", &host)?;
        }
        if let Some(port) = get("PORT") {
            config.port = parse("PORT", &port)?;
        }
        if let Some(url) = get("API_URL") {
            config.api_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(key) = lookup("API_KEY") {
            config.api_key = key;
        }
        if let Some(version) = get("API_VERSION") {
            config.api_version = version;
        }
        if let Some(dir) = get("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        if let Some(secs) = get("UPSTREAM_TIMEOUT_SECS") {
            let secs: u64 = parse("UPSTREAM_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key: "UPSTREAM_TIMEOUT_SECS",
                    value: secs.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.upstream_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Full URL of the upstream chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.api_url)
    }

    /// First 10 characters of the key, for startup logs.
    pub fn masked_api_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(10).collect();
        format!("{prefix}...")
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
