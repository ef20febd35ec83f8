//! Events routes.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use eonet_client::RawPayload;
use eonet_normalizer::{normalize_events, NormalizedResponse};
use tracing::debug;

use super::params::event_query;
use crate::error::Result;
use crate::state::AppState;

/// Upstream events payload, unchanged.
pub async fn raw_events(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<RawPayload>> {
    let query = event_query(&params);
    debug!(?query, "Fetching raw events");

    let payload = state.client.get_events(&query).await?;
    Ok(Json(payload))
}

/// Upstream events payload, flattened into the normalized shape.
pub async fn normalized_events(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<NormalizedResponse>> {
    let query = event_query(&params);
    debug!(?query, "Fetching normalized events");

    let payload = state.client.get_events(&query).await?;
    let normalized = normalize_events(&payload);
    debug!(count = normalized.count, "Normalized events");

    Ok(Json(normalized))
}
