//! Raw EONET payload → normalized schema.
//!
//! Extraction is defensive throughout: missing keys read as absent, missing or
//! non-array sequences read as empty, and non-object entries behave like empty
//! objects (`Value::get` on them yields `None`). Only the payload root must be
//! an object.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::NormalizeError;
use crate::schema::{
    EventStatus, NormalizedCategory, NormalizedEvent, NormalizedGeometry, NormalizedResponse,
    NormalizedSource,
};
use crate::timestamp::parse_timestamp;

/// A raw upstream payload: any JSON object.
pub type RawPayload = Map<String, Value>;

/// Normalize an EONET `/events` payload, stamping it with the current time.
pub fn normalize_events(payload: &RawPayload) -> NormalizedResponse {
    normalize_events_at(payload, Utc::now())
}

/// Normalize an EONET `/events` payload with an explicit generation time.
pub fn normalize_events_at(payload: &RawPayload, now: DateTime<Utc>) -> NormalizedResponse {
    let events = sequence(payload.get("events"))
        .map(normalize_event)
        .collect();

    NormalizedResponse::new(
        string_field(payload.get("title")),
        now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
        events,
    )
}

/// Normalize an untyped JSON value, rejecting anything that is not an object.
pub fn normalize_value(payload: &Value) -> Result<NormalizedResponse, NormalizeError> {
    match payload {
        Value::Object(map) => Ok(normalize_events(map)),
        other => Err(NormalizeError::NotAnObject(json_type_name(other))),
    }
}

fn normalize_event(raw: &Value) -> NormalizedEvent {
    let closed = parse_timestamp(raw.get("closed"));
    let status = EventStatus::from_closed(closed.as_deref());

    let categories = sequence(raw.get("categories"))
        .map(|c| NormalizedCategory {
            id: coerce_id(c.get("id")),
            title: string_field(c.get("title")),
        })
        .collect();

    let sources = sequence(raw.get("sources"))
        .map(|s| NormalizedSource {
            id: coerce_id(s.get("id")),
            url: string_field(s.get("url")),
        })
        .collect();

    let geometry = sequence(raw.get("geometry"))
        .map(|g| NormalizedGeometry {
            date: parse_timestamp(g.get("date")),
            kind: string_field(g.get("type")),
            coordinates: g.get("coordinates").filter(|v| !v.is_null()).cloned(),
            magnitude_value: g.get("magnitudeValue").and_then(Value::as_f64),
            magnitude_unit: string_field(g.get("magnitudeUnit")),
        })
        .collect();

    NormalizedEvent {
        id: coerce_id(raw.get("id")),
        title: string_field(raw.get("title")),
        description: string_field(raw.get("description")),
        link: string_field(raw.get("link")),
        status,
        closed,
        categories,
        sources,
        geometry,
    }
}

/// Stringify an upstream id. Missing or `null` ids become an empty string.
fn coerce_id(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Copy a text field. Numbers and booleans keep their JSON text; `null`,
/// arrays and objects have no text form and become `None`.
fn string_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        scalar @ (Value::Number(_) | Value::Bool(_)) => Some(scalar.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn sequence(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .into_iter()
        .flatten()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
