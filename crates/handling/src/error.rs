//! Handling error types.

use chrono::{DateTime, Utc};
use common::{ErrorKind, RepositoryError, TrackingId, ValidationError};
use event_bus::EventBusError;
use thiserror::Error;

use crate::HandlingEventType;

/// Errors that can occur while registering or reading handling events.
#[derive(Debug, Error)]
pub enum HandlingError {
    /// A tracking id, location or voyage number was malformed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The event type is not one of the known handling types.
    #[error("Unknown handling event type '{value}'")]
    UnknownEventType { value: String },

    /// The completion time is not an RFC3339 timestamp.
    #[error("Invalid completion time '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// LOAD and UNLOAD must name the voyage.
    #[error("{event_type} requires a voyage number")]
    MissingVoyage { event_type: HandlingEventType },

    /// Only LOAD and UNLOAD may name a voyage.
    #[error("{event_type} must not carry a voyage number")]
    UnexpectedVoyage { event_type: HandlingEventType },

    /// The event is reported as completed after it was registered.
    #[error("Completion time {completion} is after registration time {registration}")]
    CompletionInFuture {
        completion: DateTime<Utc>,
        registration: DateTime<Utc>,
    },

    /// A cargo cannot be claimed before it has been unloaded.
    #[error("Cargo {tracking_id} cannot be claimed before it has been unloaded")]
    ClaimBeforeUnload { tracking_id: TrackingId },

    /// Nothing more happens to a cargo once it has been claimed.
    #[error("Cargo {tracking_id} has already been claimed")]
    AlreadyClaimed { tracking_id: TrackingId },

    /// Storage lookup or write failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The event was stored but a subscriber failed to process it.
    #[error("Event publication failed: {0}")]
    Publication(#[from] EventBusError),
}

impl HandlingError {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HandlingError::ClaimBeforeUnload { .. } | HandlingError::AlreadyClaimed { .. } => {
                ErrorKind::BusinessRule
            }
            HandlingError::Repository(e) => e.kind(),
            HandlingError::Publication(e) => e.kind(),
            _ => ErrorKind::Validation,
        }
    }
}

/// Result type for handling operations.
pub type Result<T> = std::result::Result<T, HandlingError>;
