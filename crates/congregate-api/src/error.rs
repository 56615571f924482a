//! API error type and HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use congregate_pco::PcoError;

/// Errors surfaced by the inbound API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-caused input validation failure; reported with the reason,
    /// never retried.
    #[error("{0}")]
    Validation(String),

    /// Failure in the upstream layer.
    #[error(transparent)]
    Upstream(#[from] PcoError),

    /// No route matched.
    #[error("Not Found")]
    NotFound,
}

/// JSON error body: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error.
    ///
    /// Upstream non-2xx responses map to a single gateway status regardless
    /// of the specific upstream code; transport and other unclassified
    /// failures map to a generic 500.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(PcoError::UpstreamStatus { .. }) => StatusCode::BAD_GATEWAY,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Detail is logged server-side, never returned to the caller.
            tracing::error!(error = %self, "unexpected server error");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
