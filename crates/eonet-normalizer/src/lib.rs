//! Normalization of NASA EONET v3 event payloads.
//!
//! Upstream event JSON is loosely shaped: ids may be numbers or strings,
//! optional fields come and go, and timestamps are "ISO-ish". This crate maps
//! that shape into a stable schema the rest of the system can rely on:
//!
//! - [`normalize_events`] - Pure transform from a raw payload object
//! - [`NormalizedResponse`] / [`NormalizedEvent`] - The output schema
//! - [`ParsedTimestamp`] - Lenient timestamp parsing result
//!
//! # Example
//!
//! ```rust
//! use eonet_normalizer::{normalize_value, EventStatus};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "title": "EONET Events",
//!     "events": [{ "id": "EONET_1", "closed": "2024-03-01T00:00:00Z" }]
//! });
//!
//! let normalized = normalize_value(&raw).unwrap();
//! assert_eq!(normalized.count, 1);
//! assert_eq!(normalized.events[0].status, EventStatus::Closed);
//! ```

mod error;
mod normalize;
mod schema;
mod timestamp;

pub use error::NormalizeError;
pub use normalize::{normalize_events, normalize_events_at, normalize_value, RawPayload};
pub use schema::{
    EventStatus, NormalizedCategory, NormalizedEvent, NormalizedGeometry, NormalizedResponse,
    NormalizedSource, SOURCE_TAG,
};
pub use timestamp::{parse_timestamp, ParsedTimestamp};
