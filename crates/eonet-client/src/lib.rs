//! NASA EONET v3 client library.
//!
//! This crate provides a Rust client for fetching natural-event data from
//! EONET over HTTP. It supports:
//!
//! - Fetching events (with optional category/source/status/days/limit filters)
//! - Fetching the category and source catalogs
//! - Bounded retries with linear backoff on 5xx, 429 and transport failures
//!
//! Every failure surfaces as a single [`EonetError`].
//!
//! # Example
//!
//! ```no_run
//! use eonet_client::{EonetClient, EventQuery, Settings};
//!
//! # async fn example() -> Result<(), eonet_client::EonetError> {
//! let client = EonetClient::new(Settings::from_env())?;
//!
//! let query = EventQuery::default().with_category("wildfires").with_limit(5);
//! let payload = client.get_events(&query).await?;
//!
//! let normalized = eonet_normalizer::normalize_events(&payload);
//! println!("{} events", normalized.count);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod retry;

pub use client::EonetClient;
pub use config::Settings;
pub use eonet_normalizer::RawPayload;
pub use error::{AttemptFailure, EonetError};
pub use query::EventQuery;
pub use retry::{RetryPolicy, Sleeper, StatusClass, TokioSleeper};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
