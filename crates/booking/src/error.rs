//! Booking error types.

use common::{ErrorKind, RepositoryError, ValidationError};
use event_bus::EventBusError;
use thiserror::Error;

use crate::cargo::CargoError;

/// Errors that can occur during booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The cargo aggregate rejected the operation.
    #[error("Cargo error: {0}")]
    Cargo(#[from] CargoError),

    /// Input could not be parsed into a domain value.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage lookup or write failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The routing context could not answer.
    #[error("Routing error: {message}")]
    Routing { kind: ErrorKind, message: String },

    /// The write succeeded but publishing its events failed.
    #[error("Event publication failed: {0}")]
    Publication(#[from] EventBusError),
}

impl BookingError {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::Cargo(e) => e.kind(),
            BookingError::Validation(_) => ErrorKind::Validation,
            BookingError::Repository(e) => e.kind(),
            BookingError::Routing { kind, .. } => *kind,
            BookingError::Publication(e) => e.kind(),
        }
    }
}
