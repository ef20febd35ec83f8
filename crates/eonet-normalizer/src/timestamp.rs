//! Lenient ISO-8601 timestamp handling.
//!
//! Upstream timestamps are re-rendered canonically when they parse. When they
//! don't, the original text is kept so a single bad value never fails a
//! whole response.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde_json::Value;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Outcome of parsing a single timestamp string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedTimestamp {
    /// The input parsed and was re-rendered as `YYYY-MM-DDTHH:MM:SS[.ffffff][+HH:MM]`.
    Canonical(String),
    /// The input did not parse and is kept as-is.
    Verbatim(String),
}

impl ParsedTimestamp {
    /// Parse `raw` as an ISO-8601 timestamp. A trailing `Z` is read as `+00:00`.
    pub fn parse(raw: &str) -> Self {
        let candidate = match raw.strip_suffix('Z') {
            Some(stripped) => format!("{stripped}+00:00"),
            None => raw.to_string(),
        };

        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&candidate, format) {
                return ParsedTimestamp::Canonical(render_with_offset(&dt));
            }
        }

        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&candidate, format) {
                return ParsedTimestamp::Canonical(render_naive(&dt));
            }
        }

        if let Some(midnight) = NaiveDate::parse_from_str(&candidate, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return ParsedTimestamp::Canonical(render_naive(&midnight));
        }

        ParsedTimestamp::Verbatim(raw.to_string())
    }

    /// Whether the input was understood as a timestamp.
    pub fn is_canonical(&self) -> bool {
        matches!(self, ParsedTimestamp::Canonical(_))
    }

    pub fn into_string(self) -> String {
        match self {
            ParsedTimestamp::Canonical(s) | ParsedTimestamp::Verbatim(s) => s,
        }
    }
}

/// Apply the timestamp rule to an optional JSON field.
///
/// Missing and empty values (`null`, `""`, `false`, `0`, `[]`, `{}`) become
/// `None`. Strings go through [`ParsedTimestamp::parse`]. Anything else is
/// kept as its JSON text.
pub fn parse_timestamp(value: Option<&Value>) -> Option<String> {
    let value = value.filter(|v| !is_empty_value(v))?;
    match value {
        Value::String(s) => Some(ParsedTimestamp::parse(s).into_string()),
        other => Some(other.to_string()),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn render_naive(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() / 1_000 == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn render_with_offset(dt: &DateTime<FixedOffset>) -> String {
    format!("{}{}", render_naive(&dt.naive_local()), dt.format("%:z"))
}
