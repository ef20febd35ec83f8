//! Application state shared across handlers.

use eonet_client::EonetClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Upstream EONET client.
    pub client: EonetClient,
}

impl AppState {
    /// Create new application state.
    pub fn new(client: EonetClient) -> Self {
        Self { client }
    }
}
