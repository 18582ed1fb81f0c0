//! Routing error types.

use chrono::{DateTime, Utc};
use common::{ErrorKind, RepositoryError, UnLocode, ValidationError};
use thiserror::Error;

/// Errors that can occur while building the network or searching it.
///
/// "No route found" is not an error: searches return an empty list instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// A carrier movement starts and ends at the same location.
    #[error("Carrier movement departs from and arrives at {location}")]
    SameLocation { location: UnLocode },

    /// A carrier movement does not take any time.
    #[error("Carrier movement arrives at {arrival} which is not after its departure at {departure}")]
    ArrivalNotAfterDeparture {
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    },

    /// A schedule has no movements.
    #[error("Schedule must contain at least one carrier movement")]
    EmptySchedule,

    /// Movement `index` does not leave from where the previous one arrived.
    #[error("Movement {index} departs from {found} but the previous movement arrives at {expected}")]
    DisconnectedSchedule {
        index: usize,
        expected: UnLocode,
        found: UnLocode,
    },

    /// Movement `index` leaves before or exactly when the previous one arrives.
    #[error(
        "Movement {index} departs at {departure}, not after the previous arrival at {previous_arrival}"
    )]
    NoTransshipmentTime {
        index: usize,
        previous_arrival: DateTime<Utc>,
        departure: DateTime<Utc>,
    },

    /// A route specification with identical endpoints.
    #[error("Route origin and destination are both {0}")]
    SameOriginAndDestination(UnLocode),

    /// A shared identifier was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A repository lookup failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RoutingError {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RoutingError::Repository(e) => e.kind(),
            _ => ErrorKind::Validation,
        }
    }
}
