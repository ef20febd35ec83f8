//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use eonet_client::Settings;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";

/// Proxy server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Upstream client settings.
    pub settings: Settings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `EONET_PROXY_ADDR` | Server bind address | `0.0.0.0:5000` |
    ///
    /// Upstream variables are documented on [`Settings::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("EONET_PROXY_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(raw_addr.clone()))?;

        Ok(Self {
            addr,
            settings: Settings::from_lookup(lookup),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid EONET_PROXY_ADDR format: {0:?}")]
    InvalidAddr(String),
}
