//! Cargo aggregate implementation.

use chrono::{DateTime, Utc};
use common::TrackingId;
use event_bus::EventRecorder;

use crate::aggregate::Aggregate;

use super::{
    CargoError, CargoEvent, Delivery, HandlingSummary, Itinerary, RouteSpecification,
    RoutingStatus, TransportStatus,
};

/// Cargo aggregate root.
///
/// Owns the route specification, the assigned itinerary (if any) and the
/// current delivery snapshot. Every rejected command leaves it untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Cargo {
    tracking_id: TrackingId,
    route_specification: RouteSpecification,
    itinerary: Option<Itinerary>,
    delivery: Delivery,
    events: EventRecorder<CargoEvent>,
}

impl Aggregate for Cargo {
    type Id = TrackingId;
    type Event = CargoEvent;

    fn aggregate_type() -> &'static str {
        "Cargo"
    }

    fn id(&self) -> &TrackingId {
        &self.tracking_id
    }

    fn take_events(&mut self) -> Vec<CargoEvent> {
        self.events.take()
    }
}

// Query methods
impl Cargo {
    /// Returns the tracking ID.
    pub fn tracking_id(&self) -> TrackingId {
        self.tracking_id
    }

    /// Returns the route specification.
    pub fn route_specification(&self) -> &RouteSpecification {
        &self.route_specification
    }

    /// Returns the assigned itinerary, if routed.
    pub fn itinerary(&self) -> Option<&Itinerary> {
        self.itinerary.as_ref()
    }

    /// Returns the current delivery snapshot.
    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    /// Returns the events recorded but not yet drained.
    pub fn pending_events(&self) -> &[CargoEvent] {
        self.events.pending()
    }

    /// Claimed after being unloaded at the destination.
    pub fn is_delivered(&self) -> bool {
        self.delivery.is_delivered()
    }

    pub fn is_misdirected(&self) -> bool {
        self.delivery.is_misdirected()
    }

    /// True unless the cargo has been delivered or claimed.
    pub fn can_be_rerouted(&self) -> bool {
        !self.is_delivered() && self.delivery.transport_status() != TransportStatus::Claimed
    }

    /// Routed, not yet received, and the first departure is still ahead.
    pub fn is_ready_for_pickup(&self, now: DateTime<Utc>) -> bool {
        match &self.itinerary {
            Some(itinerary) => {
                self.delivery.routing_status() == RoutingStatus::Routed
                    && self.delivery.transport_status() == TransportStatus::NotReceived
                    && now < itinerary.first_departure()
            }
            None => false,
        }
    }

    /// The deadline has passed and the cargo is not delivered.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.route_specification.arrival_deadline() && !self.is_delivered()
    }

    /// Returns the planned final arrival, if routed.
    pub fn estimated_time_of_arrival(&self) -> Option<DateTime<Utc>> {
        self.itinerary.as_ref().map(Itinerary::final_arrival)
    }
}

// Command methods
impl Cargo {
    /// Books a new cargo.
    pub fn book(
        tracking_id: TrackingId,
        route_specification: RouteSpecification,
        now: DateTime<Utc>,
    ) -> Self {
        let mut events = EventRecorder::new();
        events.record(CargoEvent::cargo_booked(
            tracking_id,
            route_specification.origin().clone(),
            route_specification.destination().clone(),
            route_specification.arrival_deadline(),
            now,
        ));
        Self {
            tracking_id,
            route_specification,
            itinerary: None,
            delivery: Delivery::initial(now),
            events,
        }
    }

    /// Assigns an itinerary, replacing any previous one.
    ///
    /// Rejected if the cargo is delivered, if the itinerary does not satisfy
    /// the route specification, or if it arrives after the deadline.
    pub fn assign_to_route(
        &mut self,
        itinerary: Itinerary,
        now: DateTime<Utc>,
    ) -> Result<(), CargoError> {
        if self.is_delivered() {
            return Err(CargoError::AlreadyDelivered {
                tracking_id: self.tracking_id,
            });
        }
        if !itinerary.satisfies(&self.route_specification) {
            return Err(CargoError::ItineraryDoesNotSatisfySpecification {
                tracking_id: self.tracking_id,
            });
        }
        let deadline = self.route_specification.arrival_deadline();
        if itinerary.final_arrival() > deadline {
            return Err(CargoError::DeadlineExceeded {
                arrival: itinerary.final_arrival(),
                deadline,
            });
        }

        self.delivery = self.delivery.rerouted(RoutingStatus::Routed, now);
        self.events.record(CargoEvent::cargo_routed(
            self.tracking_id,
            itinerary.clone(),
            now,
        ));
        self.itinerary = Some(itinerary);
        Ok(())
    }

    /// Recomputes delivery progress from handling summaries, latest last.
    ///
    /// Returns `Ok(false)` without recording anything if the cargo is already
    /// claimed, if every summary is older than the last one applied, or if the
    /// result equals the current state. Replays are therefore harmless.
    pub fn derive_delivery_progress(
        &mut self,
        summaries: &[HandlingSummary],
        now: DateTime<Utc>,
    ) -> Result<bool, CargoError> {
        if let Some(stray) = summaries
            .iter()
            .find(|s| s.tracking_id != self.tracking_id)
        {
            return Err(CargoError::TrackingIdMismatch {
                expected: self.tracking_id,
                found: stray.tracking_id,
            });
        }
        if self.delivery.transport_status() == TransportStatus::Claimed {
            return Ok(false);
        }

        let Some(delivery) = Delivery::derive(
            &self.route_specification,
            self.itinerary.as_ref(),
            &self.delivery,
            summaries,
            now,
        ) else {
            return Ok(false);
        };
        if delivery.same_state_as(&self.delivery) {
            return Ok(false);
        }

        self.events.record(CargoEvent::delivery_updated(
            self.tracking_id,
            delivery.clone(),
        ));
        self.delivery = delivery;
        Ok(true)
    }
}
