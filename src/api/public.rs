//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::allocation::AllocationError;

// Errors

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

/// A request the handler could not make sense of, such as a missing or
/// mistyped query parameter.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct InvalidRequest(pub String);

pub struct ApiError(anyhow::Error);

impl ApiError {
    fn status(&self) -> StatusCode {
        if self.0.is::<InvalidRequest>() {
            return StatusCode::BAD_REQUEST;
        }
        match self.0.downcast_ref::<AllocationError>() {
            Some(AllocationError::InvalidDateFormat(_)) => StatusCode::BAD_REQUEST,
            Some(AllocationError::MalformedEvent { .. }) => StatusCode::BAD_GATEWAY,
            Some(AllocationError::UpstreamFetchFailure(_)) => StatusCode::BAD_GATEWAY,
            Some(AllocationError::ConfigurationError(_)) | None => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.0);

        let status = self.status();
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` or `Result<_, AllocationError>` to turn them into
/// `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Re-export public types from each route

pub mod events {
    pub use crate::api::routes::events::public::*;
}

pub mod records {
    pub use crate::api::routes::records::public::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AllocationError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn it_maps_errors_to_status_codes() {
        assert_eq!(
            status_of(AllocationError::InvalidDateFormat("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AllocationError::malformed("standup", "missing end")),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AllocationError::UpstreamFetchFailure("timeout".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AllocationError::ConfigurationError("zero".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(InvalidRequest("missing field `date`".into()))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(anyhow::anyhow!("boom")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
