//! Configuration for the EONET client.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::retry::RetryPolicy;

/// Default EONET v3 base URL.
pub const DEFAULT_BASE_URL: &str = "https://eonet.gsfc.nasa.gov/api/v3";

/// Default per-attempt timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default number of attempts per request.
pub const DEFAULT_RETRIES: u32 = 3;

/// Default backoff base in seconds.
pub const DEFAULT_BACKOFF_SECS: f64 = 0.7;

/// Settings for talking to EONET.
///
/// Built once at startup and handed to [`crate::EonetClient::new`].
#[derive(Clone, PartialEq)]
pub struct Settings {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// NASA API key. Loaded for completeness; EONET does not require one and
    /// requests never carry it.
    pub api_key: Option<String>,
    /// Per-attempt timeout in seconds.
    pub timeout_secs: u64,
    /// Total attempts per request (at least 1).
    pub retries: u32,
    /// Seconds multiplied by the attempt number between retries.
    pub backoff_secs: f64,
}

impl Settings {
    /// Create settings for the given base URL with default HTTP behavior.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url.into()),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            backoff_secs: DEFAULT_BACKOFF_SECS,
        }
    }

    /// Override the retry count and backoff base.
    pub fn with_retries(mut self, retries: u32, backoff_secs: f64) -> Self {
        self.retries = retries.max(1);
        self.backoff_secs = sanitize_backoff(backoff_secs);
        self
    }

    /// Override the per-attempt timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = sanitize_timeout(timeout_secs);
        self
    }

    /// Load settings from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `EONET_BASE_URL` | Upstream base URL | `https://eonet.gsfc.nasa.gov/api/v3` |
    /// | `NASA_API_KEY` | Optional API key | (unset) |
    /// | `HTTP_TIMEOUT_SECONDS` | Per-attempt timeout | `15` |
    /// | `HTTP_RETRIES` | Attempts per request | `3` |
    /// | `HTTP_BACKOFF_SECONDS` | Backoff base | `0.7` |
    ///
    /// Values that fail to parse fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("EONET_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let api_key = lookup("NASA_API_KEY").filter(|v| !v.is_empty());

        let timeout_secs = parse_or(&lookup, "HTTP_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECS);
        let retries = parse_or(&lookup, "HTTP_RETRIES", DEFAULT_RETRIES);
        let backoff_secs = parse_or(&lookup, "HTTP_BACKOFF_SECONDS", DEFAULT_BACKOFF_SECS);

        Self {
            base_url: trim_base_url(base_url),
            api_key,
            timeout_secs: sanitize_timeout(timeout_secs),
            retries: retries.max(1),
            backoff_secs: sanitize_backoff(backoff_secs),
        }
    }

    /// Per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry policy derived from these settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        let backoff = Duration::try_from_secs_f64(self.backoff_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_BACKOFF_SECS));
        RetryPolicy::new(self.retries, backoff)
    }

    /// Build the URL for a resource path, e.g. `events` or `/events`.
    pub fn resource_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("retries", &self.retries)
            .field("backoff_secs", &self.backoff_secs)
            .finish()
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", name, raw);
            default
        }),
        None => default,
    }
}

fn trim_base_url(base_url: String) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

// Zero means "unset".
fn sanitize_timeout(timeout_secs: u64) -> u64 {
    if timeout_secs == 0 {
        DEFAULT_TIMEOUT_SECS
    } else {
        timeout_secs
    }
}

fn sanitize_backoff(backoff_secs: f64) -> f64 {
    if backoff_secs.is_finite() && backoff_secs >= 0.0 {
        backoff_secs
    } else {
        DEFAULT_BACKOFF_SECS
    }
}
