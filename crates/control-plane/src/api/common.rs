// Common DTOs for public API
//
// These types are shared across multiple API endpoints.
// Decision: Service errors map to statuses in one place (ApiError)
// Decision: Malformed paths and bodies answer with the same JSON error shape

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventhub_core::{EventsError, FieldError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
    /// Per-field violations, present only for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// JSON request body whose rejection is an `ApiError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Path parameters whose rejection is an `ApiError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

/// Error rendered as an HTTP response
#[derive(Debug)]
pub enum ApiError {
    /// A service operation failed
    Service(EventsError),
    /// The request could not be parsed
    Rejected { status: StatusCode, message: String },
}

impl From<EventsError> for ApiError {
    fn from(err: EventsError) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Service(err) => err,
            ApiError::Rejected { status, message } => {
                tracing::debug!(%status, "Rejected request: {}", message);
                return ErrorResponse::new(message)
                    .into_response(status)
                    .into_response();
            }
        };

        let (status, body) = match err {
            EventsError::Validation(errors) => {
                tracing::debug!("Rejected submission: {}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Validation failed", errors.into_fields()),
                )
            }
            err @ EventsError::Forbidden { .. } => {
                (StatusCode::FORBIDDEN, ErrorResponse::new(err.to_string()))
            }
            EventsError::EventNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorResponse::new("Event not found"))
            }
            err @ EventsError::AlreadyAttending { .. } => {
                (StatusCode::CONFLICT, ErrorResponse::new(err.to_string()))
            }
            EventsError::Store(e) => {
                tracing::error!("Store operation failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        body.into_response(status).into_response()
    }
}
