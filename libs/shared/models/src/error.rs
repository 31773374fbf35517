use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Rejections detected locally, before anything is sent to the Scheduling Service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields ({0} is missing)")]
    MissingField(&'static str),

    #[error("Appointment time cannot be in the past")]
    PastTime,

    #[error("Appointment time is already taken")]
    SlotTaken,

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Failures reported by, or on the way to, the Scheduling Service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Scheduling service unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status. `message` is the
    /// service's own wording and is shown as-is.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from scheduling service: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream rejected request ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::SlotTaken => AppError::Conflict(err.to_string()),
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected { status, message } => AppError::Upstream { status, message },
            other => AppError::ExternalService(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Upstream { status, message } => (upstream_status(*status), message),
            AppError::ExternalService(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        tracing::error!("Error: {}: {}", status, message);

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Keeps the service's error status. A rejection that arrived under a
/// non-error status (an `{ "error" }` body on 200) must still read as a failure.
fn upstream_status(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code) if code.is_client_error() || code.is_server_error() => code,
        _ => StatusCode::BAD_GATEWAY,
    }
}
