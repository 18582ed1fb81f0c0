//! Handling service: registers reports and serves handling histories.

use chrono::Utc;
use common::TrackingId;
use event_bus::{EventEnvelope, EventPublisher};

use crate::error::{HandlingError, Result};
use crate::repository::HandlingEventRepository;
use crate::{HandlingEvent, HandlingEventType, HandlingHistory, HandlingReport};

/// Aggregate type recorded on published handling envelopes.
pub const AGGREGATE_TYPE: &str = "HandlingEvent";

/// Service for registering handling events.
///
/// A registration is stored first and published afterwards. If a subscriber
/// fails, the caller gets `Publication` but the event stays registered.
pub struct HandlingService<R: HandlingEventRepository, P: EventPublisher> {
    events: R,
    publisher: P,
}

impl<R: HandlingEventRepository, P: EventPublisher> HandlingService<R, P> {
    /// Creates a new handling service.
    pub fn new(events: R, publisher: P) -> Self {
        Self { events, publisher }
    }

    /// Returns the event repository.
    pub fn repository(&self) -> &R {
        &self.events
    }

    /// Parses, validates, stores and publishes a handling report.
    #[tracing::instrument(
        skip(self, report),
        fields(tracking_id = %report.tracking_id, event_type = %report.event_type)
    )]
    pub async fn submit_handling_report(&self, report: HandlingReport) -> Result<HandlingEvent> {
        let event = report.parse(Utc::now())?;

        let history = self.get_handling_history(&event.tracking_id()).await?;
        if history.has_been_claimed() {
            return Err(HandlingError::AlreadyClaimed {
                tracking_id: event.tracking_id(),
            });
        }
        if event.event_type() == HandlingEventType::Claim
            && !history.contains(HandlingEventType::Unload)
        {
            return Err(HandlingError::ClaimBeforeUnload {
                tracking_id: event.tracking_id(),
            });
        }

        let envelope = EventEnvelope::from_event(AGGREGATE_TYPE, event.id(), &event.registered())?;
        self.events.store(&event).await?;
        metrics::counter!(
            "handling_events_registered_total",
            "event_type" => event.event_type().as_str()
        )
        .increment(1);
        tracing::info!(
            event_id = %event.id(),
            location = %event.location(),
            "handling event registered"
        );

        self.publisher.publish(envelope).await?;
        Ok(event)
    }

    /// Returns the ordered handling history of a cargo. Unknown cargos have
    /// an empty history.
    #[tracing::instrument(skip(self))]
    pub async fn get_handling_history(&self, tracking_id: &TrackingId) -> Result<HandlingHistory> {
        let events = self.events.find_by_tracking_id(tracking_id).await?;
        Ok(HandlingHistory::new(events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryHandlingEventRepository;
    use chrono::Duration;
    use common::ErrorKind;
    use event_bus::InMemoryEventBus;

    fn service() -> (
        HandlingService<InMemoryHandlingEventRepository, InMemoryEventBus>,
        InMemoryEventBus,
    ) {
        let bus = InMemoryEventBus::new();
        (
            HandlingService::new(InMemoryHandlingEventRepository::new(), bus.clone()),
            bus,
        )
    }

    fn report(
        tracking_id: TrackingId,
        event_type: &str,
        at: &str,
        voyage: Option<&str>,
    ) -> HandlingReport {
        HandlingReport::new(
            tracking_id.to_string(),
            event_type,
            at,
            voyage,
            Utc::now() - Duration::minutes(5),
        )
    }

    #[tokio::test]
    async fn registration_is_stored_and_published() {
        let (service, bus) = service();
        let tracking_id = TrackingId::generate();

        let event = service
            .submit_handling_report(report(tracking_id, "LOAD", "USNYC", Some("0100S")))
            .await
            .unwrap();

        let published = bus.published().await;
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].event_name, "HandlingEventRegistered");
        assert_eq!(published[0].aggregate_type, AGGREGATE_TYPE);
        assert_eq!(published[0].aggregate_id, event.id().to_string());
        assert_eq!(published[0].payload["tracking_id"], tracking_id.to_string());
        assert_eq!(service.repository().len().await, 1);
    }

    #[tokio::test]
    async fn invalid_report_stores_nothing() {
        let (service, bus) = service();

        let err = service
            .submit_handling_report(report(TrackingId::generate(), "LOAD", "USNYC", None))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(service.repository().is_empty().await);
        assert_eq!(bus.published_count().await, 0);
    }

    #[tokio::test]
    async fn claim_requires_a_prior_unload() {
        let (service, _bus) = service();
        let tracking_id = TrackingId::generate();

        let err = service
            .submit_handling_report(report(tracking_id, "CLAIM", "DEHAM", None))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlingError::ClaimBeforeUnload { .. }));
        assert_eq!(err.kind(), ErrorKind::BusinessRule);

        service
            .submit_handling_report(report(tracking_id, "UNLOAD", "DEHAM", Some("0100S")))
            .await
            .unwrap();
        service
            .submit_handling_report(report(tracking_id, "CLAIM", "DEHAM", None))
            .await
            .unwrap();

        let history = service.get_handling_history(&tracking_id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.has_been_claimed());
    }

    #[tokio::test]
    async fn claimed_cargo_accepts_no_further_reports() {
        let (service, bus) = service();
        let tracking_id = TrackingId::generate();
        service
            .submit_handling_report(report(tracking_id, "UNLOAD", "DEHAM", Some("0100S")))
            .await
            .unwrap();
        service
            .submit_handling_report(report(tracking_id, "CLAIM", "DEHAM", None))
            .await
            .unwrap();
        let published = bus.published_count().await;

        let err = service
            .submit_handling_report(report(tracking_id, "LOAD", "DEHAM", Some("0100S")))
            .await
            .unwrap_err();

        assert!(matches!(err, HandlingError::AlreadyClaimed { .. }));
        assert_eq!(err.kind(), ErrorKind::BusinessRule);
        assert_eq!(service.repository().len().await, 2);
        assert_eq!(bus.published_count().await, published);
    }

    #[tokio::test]
    async fn unknown_cargo_has_empty_history() {
        let (service, _bus) = service();
        let history = service
            .get_handling_history(&TrackingId::generate())
            .await
            .unwrap();
        assert!(history.is_empty());
    }
}
