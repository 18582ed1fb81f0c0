//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use booking::BookingError;
use common::{ErrorKind, ValidationError};
use handling::HandlingError;
use routing::RoutingError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Error raised by one of the contexts, mapped by its kind.
    Domain { kind: ErrorKind, message: String },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain { kind, .. } => match kind {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::BusinessRule => StatusCode::CONFLICT,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (kind, message) = match self {
            ApiError::NotFound(msg) => (ErrorKind::NotFound, msg),
            ApiError::BadRequest(msg) => (ErrorKind::Validation, msg),
            ApiError::Domain { kind, message } => (kind, message),
        };
        if status.is_server_error() {
            tracing::error!(error = %message, "internal server error");
        }

        let body = serde_json::json!({ "error": message, "kind": kind.as_str() });
        (status, axum::Json(body)).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        ApiError::Domain {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<HandlingError> for ApiError {
    fn from(err: HandlingError) -> Self {
        ApiError::Domain {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<RoutingError> for ApiError {
    fn from(err: RoutingError) -> Self {
        ApiError::Domain {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
