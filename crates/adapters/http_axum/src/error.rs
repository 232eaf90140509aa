//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use clientele_domain::error::{ClienteleError, NotFoundError};
use clientele_domain::time::{self, Timestamp};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    status: u16,
    error: String,
    timestamp: Timestamp,
}

/// Maps failures to an HTTP response with appropriate status code.
///
/// | Source | Status | Body |
/// |---|---|---|
/// | `Validation` | 422 | joined violation messages |
/// | `Conflict` | 409 | none |
/// | `NotFound` | 404 | error message |
/// | `Storage` | 500 | generic message, details logged |
/// | unreadable request body | 400 / 415 / 422 | decoder message |
#[derive(Debug)]
pub enum ApiError {
    /// A use-case refused the request.
    Domain(ClienteleError),
    /// The request body could not be decoded.
    Body(JsonRejection),
}

impl ApiError {
    /// A 404 for a path segment that cannot name any stored record.
    pub(crate) fn unknown_id(entity: &'static str, id: &str) -> Self {
        Self::Domain(
            NotFoundError {
                entity,
                id: id.to_owned(),
            }
            .into(),
        )
    }
}

impl From<ClienteleError> for ApiError {
    fn from(err: ClienteleError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(ClienteleError::Validation(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            Self::Domain(ClienteleError::Conflict(_)) => {
                return StatusCode::CONFLICT.into_response();
            }
            Self::Domain(ClienteleError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(ClienteleError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::Body(rejection) => {
                tracing::debug!(error = %rejection, "rejecting unreadable request body");
                (rejection.status(), rejection.body_text())
            }
        };

        let body = ErrorBody {
            status: status.as_u16(),
            error: message,
            timestamp: time::now(),
        };
        (status, Json(body)).into_response()
    }
}
