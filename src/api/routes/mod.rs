//! API routes module

pub mod events;
pub mod records;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

async fn health() -> &'static str {
    "ok"
}

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Weekly allocation for a date
        .nest("/events", events::router())
        // Roster spreadsheet passthrough
        .nest("/records", records::router())
        .route("/health", axum::routing::get(health))
}
