//! Router for the roster records API

use std::sync::Arc;

use axum::{Router, extract::State, response::Html};
use axum_extra::extract::{Query, QueryRejection};

use super::public;
use crate::allocation::AllocationError;
use crate::api::public::InvalidRequest;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn records_handler(
    State(state): State<SharedState>,
    query: Result<Query<public::RecordsParams>, QueryRejection>,
) -> Result<Html<String>, crate::api::public::ApiError> {
    let Query(params) = query.map_err(|rejection| InvalidRequest(rejection.to_string()))?;
    let html = state
        .sheets
        .fetch_records(&params.sheet_name)
        .await
        .map_err(|e| match e.downcast::<AllocationError>() {
            Ok(err) => err,
            Err(e) => AllocationError::upstream(e),
        })?;

    Ok(Html(html))
}

/// Create the records router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(records_handler))
}
