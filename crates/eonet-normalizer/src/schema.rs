//! Output schema for normalized EONET events.
//!
//! Field names here are the stable contract exposed by the proxy. Optional
//! fields serialize as `null` rather than being omitted, so consumers always
//! see the same set of keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provenance tag identifying the upstream these events came from.
pub const SOURCE_TAG: &str = "NASA_EONET_V3";

/// Whether an event is still ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Open,
    Closed,
}

impl EventStatus {
    /// Derive the status from the normalized `closed` timestamp.
    pub fn from_closed(closed: Option<&str>) -> Self {
        match closed {
            Some(_) => EventStatus::Closed,
            None => EventStatus::Open,
        }
    }
}

/// A category an event belongs to (e.g. "wildfires").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCategory {
    pub id: String,
    pub title: Option<String>,
}

/// A reporting source for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSource {
    pub id: String,
    pub url: Option<String>,
}

/// One observation of an event's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedGeometry {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Point `[lon, lat]`, polygon rings, or whatever shape upstream sent.
    pub coordinates: Option<Value>,
    pub magnitude_value: Option<f64>,
    pub magnitude_unit: Option<String>,
}

/// A single normalized event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub status: EventStatus,
    pub closed: Option<String>,
    pub categories: Vec<NormalizedCategory>,
    pub sources: Vec<NormalizedSource>,
    pub geometry: Vec<NormalizedGeometry>,
}

/// The normalized events plus provenance metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResponse {
    pub source: String,
    pub title: Option<String>,
    pub generated_at: String,
    pub count: usize,
    pub events: Vec<NormalizedEvent>,
}

impl NormalizedResponse {
    /// Wrap normalized events, keeping `count` in step with `events`.
    pub fn new(title: Option<String>, generated_at: String, events: Vec<NormalizedEvent>) -> Self {
        Self {
            source: SOURCE_TAG.to_string(),
            title,
            generated_at,
            count: events.len(),
            events,
        }
    }
}
