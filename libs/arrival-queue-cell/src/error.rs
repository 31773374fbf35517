use thiserror::Error;

use shared_models::{error::AppError, ServiceError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrivalError {
    #[error("Please enter your name")]
    MissingName,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Please enter your name")]
    MissingName,

    /// No queued entry for the name; carries the service's own message.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<ArrivalError> for AppError {
    fn from(err: ArrivalError) -> Self {
        match err {
            ArrivalError::MissingName => AppError::BadRequest(err.to_string()),
            ArrivalError::Service(e) => e.into(),
        }
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::MissingName => AppError::BadRequest(err.to_string()),
            LookupError::NotFound(message) => AppError::NotFound(message),
            LookupError::Service(e) => e.into(),
        }
    }
}
