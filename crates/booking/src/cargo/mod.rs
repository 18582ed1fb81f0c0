//! Cargo aggregate and related types.

mod aggregate;
mod commands;
mod delivery;
mod events;
mod handling;
mod state;
mod value_objects;

pub use aggregate::Cargo;
pub use commands::{AssignRoute, BookCargo, UpdateDelivery};
pub use delivery::Delivery;
pub use events::{CargoBookedData, CargoDeliveryUpdatedData, CargoEvent, CargoRoutedData};
pub use handling::{HandlingSummary, HandlingType};
pub use state::{RoutingStatus, TransportStatus};
pub use value_objects::{Itinerary, Leg, RouteSpecification};

use chrono::{DateTime, Utc};
use common::{ErrorKind, TrackingId, UnLocode};
use thiserror::Error;

/// Errors that can occur during cargo operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CargoError {
    /// Origin and destination are the same location.
    #[error("Origin and destination are both {location}")]
    SameOriginAndDestination { location: UnLocode },

    /// The arrival deadline was not in the future when the cargo was booked.
    #[error("Arrival deadline {deadline} is not in the future")]
    DeadlineNotInFuture { deadline: DateTime<Utc> },

    /// A leg loads and unloads at the same location.
    #[error("Leg loads and unloads at {location}")]
    LegSameLocation { location: UnLocode },

    /// A leg unloads before, or at the same time as, it loads.
    #[error("Leg unload time {unload_time} is not after load time {load_time}")]
    LegUnloadNotAfterLoad {
        load_time: DateTime<Utc>,
        unload_time: DateTime<Utc>,
    },

    /// An itinerary has no legs.
    #[error("Itinerary has no legs")]
    EmptyItinerary,

    /// A leg does not load where the previous leg unloaded.
    #[error("Leg {index} loads at {found} but the previous leg unloads at {expected}")]
    DisconnectedLegs {
        index: usize,
        expected: UnLocode,
        found: UnLocode,
    },

    /// A leg loads before the previous leg has unloaded.
    #[error("Leg {index} loads at {load_time}, not after the previous unload at {previous_unload}")]
    NoTransshipmentTime {
        index: usize,
        previous_unload: DateTime<Utc>,
        load_time: DateTime<Utc>,
    },

    /// A handling summary belongs to a different cargo.
    #[error("Handling summary for {found} applied to cargo {expected}")]
    TrackingIdMismatch {
        expected: TrackingId,
        found: TrackingId,
    },

    /// The cargo has been delivered and can no longer change route.
    #[error("Cargo {tracking_id} has already been delivered")]
    AlreadyDelivered { tracking_id: TrackingId },

    /// The itinerary does not take the cargo from origin to destination in time.
    #[error("Itinerary does not satisfy the route specification of cargo {tracking_id}")]
    ItineraryDoesNotSatisfySpecification { tracking_id: TrackingId },

    /// The itinerary arrives after the deadline.
    #[error("Itinerary arrives at {arrival}, after the deadline {deadline}")]
    DeadlineExceeded {
        arrival: DateTime<Utc>,
        deadline: DateTime<Utc>,
    },
}

impl CargoError {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CargoError::AlreadyDelivered { .. }
            | CargoError::ItineraryDoesNotSatisfySpecification { .. }
            | CargoError::DeadlineExceeded { .. } => ErrorKind::BusinessRule,
            _ => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rules_are_distinguished_from_validation() {
        let tracking_id = TrackingId::generate();

        assert_eq!(
            CargoError::AlreadyDelivered { tracking_id }.kind(),
            ErrorKind::BusinessRule
        );
        assert_eq!(
            CargoError::ItineraryDoesNotSatisfySpecification { tracking_id }.kind(),
            ErrorKind::BusinessRule
        );
        assert_eq!(CargoError::EmptyItinerary.kind(), ErrorKind::Validation);
        assert_eq!(
            CargoError::SameOriginAndDestination {
                location: UnLocode::new("USNYC").unwrap()
            }
            .kind(),
            ErrorKind::Validation
        );
    }
}
