//! Event-driven anti-corruption layer from the handling context.
//!
//! The handling context publishes `HandlingEventRegistered` envelopes. This
//! subscriber decodes their JSON payload into a booking-owned shape, turns it
//! into a [`HandlingSummary`] and asks the booking service to recompute the
//! cargo's delivery.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{TrackingId, UnLocode, VoyageNumber};
use event_bus::{BoxError, EventEnvelope, EventHandler, EventPublisher};
use serde::Deserialize;

use crate::cargo::{HandlingSummary, HandlingType, UpdateDelivery};
use crate::repository::CargoRepository;
use crate::service::{BookingService, RoutingGateway};

/// Name of the event this subscriber consumes.
pub const HANDLING_EVENT_REGISTERED: &str = "HandlingEventRegistered";

/// The parts of a handling registration booking cares about, as published.
#[derive(Debug, Deserialize)]
struct RegisteredHandling {
    tracking_id: String,
    event_type: String,
    location: String,
    voyage_number: Option<String>,
    completion_time: DateTime<Utc>,
}

/// Payload could not be understood.
#[derive(Debug, thiserror::Error)]
#[error("Unrecognised handling payload: {0}")]
struct Untranslatable(String);

impl RegisteredHandling {
    fn into_summary(self) -> Result<HandlingSummary, BoxError> {
        let handling_type = HandlingType::parse(&self.event_type)
            .ok_or_else(|| Untranslatable(format!("event type {}", self.event_type)))?;
        Ok(HandlingSummary {
            tracking_id: self.tracking_id.parse::<TrackingId>()?,
            handling_type,
            location: UnLocode::new(&self.location)?,
            voyage_number: self.voyage_number.map(VoyageNumber::new).transpose()?,
            completed_at: self.completion_time,
        })
    }
}

/// Subscriber that keeps cargo delivery in step with handling.
pub struct HandlingEventSubscriber<R, G, P>
where
    R: CargoRepository,
    G: RoutingGateway,
    P: EventPublisher,
{
    booking: Arc<BookingService<R, G, P>>,
}

impl<R, G, P> HandlingEventSubscriber<R, G, P>
where
    R: CargoRepository,
    G: RoutingGateway,
    P: EventPublisher,
{
    /// Creates a subscriber that updates cargos through `booking`.
    pub fn new(booking: Arc<BookingService<R, G, P>>) -> Self {
        Self { booking }
    }
}

#[async_trait]
impl<R, G, P> EventHandler for HandlingEventSubscriber<R, G, P>
where
    R: CargoRepository,
    G: RoutingGateway,
    P: EventPublisher,
{
    fn name(&self) -> &'static str {
        "booking.handling_event_subscriber"
    }

    #[tracing::instrument(skip(self, event), fields(event_id = %event.event_id))]
    async fn handle(&self, event: &EventEnvelope) -> Result<(), BoxError> {
        if event.event_name != HANDLING_EVENT_REGISTERED {
            tracing::debug!(event_name = %event.event_name, "ignoring event");
            return Ok(());
        }

        let summary = event.decode::<RegisteredHandling>()?.into_summary()?;
        self.booking
            .update_cargo_delivery(UpdateDelivery::single(summary))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::{BookCargo, Itinerary, RouteSpecification, TransportStatus};
    use crate::error::BookingError;
    use crate::repository::InMemoryCargoRepository;
    use chrono::Duration;
    use event_bus::InMemoryEventBus;
    use serde_json::json;

    struct NoRoutes;

    #[async_trait]
    impl RoutingGateway for NoRoutes {
        async fn fetch_routes_for(
            &self,
            _spec: &RouteSpecification,
        ) -> Result<Vec<Itinerary>, BookingError> {
            Ok(Vec::new())
        }
    }

    type Booking = BookingService<InMemoryCargoRepository, NoRoutes, InMemoryEventBus>;
    type Subscriber = HandlingEventSubscriber<InMemoryCargoRepository, NoRoutes, InMemoryEventBus>;

    fn setup() -> (Arc<Booking>, Subscriber) {
        let booking = Arc::new(BookingService::new(
            InMemoryCargoRepository::new(),
            NoRoutes,
            InMemoryEventBus::new(),
        ));
        let subscriber = HandlingEventSubscriber::new(booking.clone());
        (booking, subscriber)
    }

    fn registered(tracking_id: &str, event_type: &str) -> EventEnvelope {
        EventEnvelope::builder()
            .event_name(HANDLING_EVENT_REGISTERED)
            .aggregate_type("HandlingEvent")
            .aggregate_id("h-1")
            .payload_raw(json!({
                "event_id": "h-1",
                "tracking_id": tracking_id,
                "event_type": event_type,
                "location": "USNYC",
                "voyage_number": null,
                "completion_time": Utc::now().to_rfc3339(),
                "registration_time": Utc::now().to_rfc3339(),
            }))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn registration_updates_cargo_delivery() {
        let (booking, subscriber) = setup();
        let cmd = BookCargo::new(
            UnLocode::new("USNYC").unwrap(),
            UnLocode::new("DEHAM").unwrap(),
            Utc::now() + Duration::days(30),
        );
        let tracking_id = booking.book_new_cargo(cmd).await.unwrap();

        subscriber
            .handle(&registered(&tracking_id.to_string(), "RECEIVE"))
            .await
            .unwrap();

        let details = booking.get_cargo_details(&tracking_id).await.unwrap();
        assert_eq!(details.delivery.transport_status(), TransportStatus::InPort);
    }

    #[tokio::test]
    async fn unknown_cargo_is_a_handler_failure() {
        let (_booking, subscriber) = setup();
        let result = subscriber
            .handle(&registered(&TrackingId::generate().to_string(), "RECEIVE"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn malformed_payload_is_a_handler_failure() {
        let (_booking, subscriber) = setup();
        let result = subscriber.handle(&registered("not-a-uuid", "RECEIVE")).await;
        assert!(result.is_err());

        let result = subscriber
            .handle(&registered(&TrackingId::generate().to_string(), "TELEPORT"))
            .await;
        assert!(result.unwrap_err().to_string().contains("TELEPORT"));
    }

    #[tokio::test]
    async fn other_events_are_ignored() {
        let (_booking, subscriber) = setup();
        let event = EventEnvelope::builder()
            .event_name("CargoBooked")
            .aggregate_type("Cargo")
            .aggregate_id("c-1")
            .payload_raw(json!({}))
            .build()
            .unwrap();

        subscriber.handle(&event).await.unwrap();
    }
}
