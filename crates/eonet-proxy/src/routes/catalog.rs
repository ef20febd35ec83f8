//! Category and source catalog routes.

use axum::extract::State;
use axum::Json;
use eonet_client::RawPayload;

use crate::error::Result;
use crate::state::AppState;

/// Upstream category catalog.
pub async fn categories(State(state): State<AppState>) -> Result<Json<RawPayload>> {
    Ok(Json(state.client.get_categories().await?))
}

/// Upstream source catalog.
pub async fn sources(State(state): State<AppState>) -> Result<Json<RawPayload>> {
    Ok(Json(state.client.get_sources().await?))
}
