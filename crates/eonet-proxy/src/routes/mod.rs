//! Route handlers for the EONET proxy.

pub mod catalog;
pub mod events;
pub mod health;
pub mod params;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Prefix the EONET routes are also served under.
pub const NASA_PREFIX: &str = "/api/nasa";

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // EONET endpoints
        .merge(eonet_routes())
        .nest(NASA_PREFIX, eonet_routes())
}

fn eonet_routes() -> Router<AppState> {
    Router::new()
        .route("/raw/events", get(events::raw_events))
        .route("/normalized/events", get(events::normalized_events))
        .route("/categories", get(catalog::categories))
        .route("/sources", get(catalog::sources))
}
