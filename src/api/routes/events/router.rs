//! Router for the events API

use std::sync::Arc;

use axum::{Router, extract::State, response::Json};
use axum_extra::extract::{Query, QueryRejection};

use super::public;
use crate::allocation::allocate_for_date;
use crate::api::public::InvalidRequest;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn events_handler(
    State(state): State<SharedState>,
    query: Result<Query<public::EventsParams>, QueryRejection>,
) -> Result<Json<public::EventsResponse>, crate::api::public::ApiError> {
    let Query(params) = query.map_err(|rejection| InvalidRequest(rejection.to_string()))?;
    let aggregation =
        allocate_for_date(&params.date, &state.config, state.calendar.as_ref()).await?;

    Ok(Json(public::EventsResponse::from_aggregation(
        aggregation,
        params.include_events,
    )))
}

/// Create the events router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(events_handler))
}
