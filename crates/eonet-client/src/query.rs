//! Query filters for the EONET `/events` resource.

/// Optional filters for [`crate::EonetClient::get_events`].
///
/// Only the filters that are set end up in the query string; empty strings
/// count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Category id, e.g. `wildfires`.
    pub category: Option<String>,
    /// Source id, e.g. `InciWeb`.
    pub source: Option<String>,
    /// `open` or `closed`; passed through as-is.
    pub status: Option<String>,
    /// Only events from the last N days.
    pub days: Option<u64>,
    /// Maximum number of events.
    pub limit: Option<u64>,
}

impl EventQuery {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_days(mut self, days: u64) -> Self {
        self.days = Some(days);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query pairs for the filters that are set, in a stable order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("category", &self.category),
            ("source", &self.source),
            ("status", &self.status),
        ];
        let numbers = [("days", self.days), ("limit", self.limit)];

        text.into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.to_string()))
            })
            .chain(
                numbers
                    .into_iter()
                    .filter_map(|(key, value)| value.map(|v| (key, v.to_string()))),
            )
            .collect()
    }
}
