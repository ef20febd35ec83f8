//! Query-string handling for the events routes.

use std::collections::HashMap;

use eonet_client::EventQuery;

/// Build an [`EventQuery`] from raw query parameters.
///
/// Text filters pass through when non-empty. `days` and `limit` are kept only
/// when they are plain ASCII digits; anything else is dropped rather than
/// rejected.
pub fn event_query(params: &HashMap<String, String>) -> EventQuery {
    EventQuery {
        category: text(params, "category"),
        source: text(params, "source"),
        status: text(params, "status"),
        days: count(params, "days"),
        limit: count(params, "limit"),
    }
}

fn text(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|v| !v.is_empty()).cloned()
}

fn count(params: &HashMap<String, String>, key: &str) -> Option<u64> {
    params.get(key).and_then(|v| parse_count(v))
}

/// Parse a non-negative count, accepting digits only (no sign, no spaces).
///
/// Digit strings too large for a `u64` are dropped as well.
pub fn parse_count(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
