//! Cargo domain events.

use chrono::{DateTime, Utc};
use common::{TrackingId, UnLocode};
use event_bus::DomainEvent;
use serde::Serialize;

use super::{Delivery, Itinerary};

/// Events that can occur on a cargo aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CargoEvent {
    /// Cargo was booked.
    CargoBooked(CargoBookedData),

    /// An itinerary was assigned to the cargo.
    CargoRouted(CargoRoutedData),

    /// Delivery progress was recomputed.
    CargoDeliveryUpdated(CargoDeliveryUpdatedData),
}

impl DomainEvent for CargoEvent {
    fn event_name(&self) -> &'static str {
        match self {
            CargoEvent::CargoBooked(_) => "CargoBooked",
            CargoEvent::CargoRouted(_) => "CargoRouted",
            CargoEvent::CargoDeliveryUpdated(_) => "CargoDeliveryUpdated",
        }
    }
}

/// Data for CargoBooked event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoBookedData {
    pub tracking_id: TrackingId,
    pub origin: UnLocode,
    pub destination: UnLocode,
    pub arrival_deadline: DateTime<Utc>,
    pub booked_at: DateTime<Utc>,
}

/// Data for CargoRouted event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoRoutedData {
    pub tracking_id: TrackingId,
    pub itinerary: Itinerary,
    pub routed_at: DateTime<Utc>,
}

/// Data for CargoDeliveryUpdated event.
///
/// Carries the whole new snapshot, never a partial change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoDeliveryUpdatedData {
    pub tracking_id: TrackingId,
    pub delivery: Delivery,
}

impl CargoEvent {
    pub(crate) fn cargo_booked(
        tracking_id: TrackingId,
        origin: UnLocode,
        destination: UnLocode,
        arrival_deadline: DateTime<Utc>,
        booked_at: DateTime<Utc>,
    ) -> Self {
        CargoEvent::CargoBooked(CargoBookedData {
            tracking_id,
            origin,
            destination,
            arrival_deadline,
            booked_at,
        })
    }

    pub(crate) fn cargo_routed(
        tracking_id: TrackingId,
        itinerary: Itinerary,
        routed_at: DateTime<Utc>,
    ) -> Self {
        CargoEvent::CargoRouted(CargoRoutedData {
            tracking_id,
            itinerary,
            routed_at,
        })
    }

    pub(crate) fn delivery_updated(tracking_id: TrackingId, delivery: Delivery) -> Self {
        CargoEvent::CargoDeliveryUpdated(CargoDeliveryUpdatedData {
            tracking_id,
            delivery,
        })
    }
}
