//! Integration tests for handling registration over the event bus.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use common::{ErrorKind, TrackingId};
use event_bus::{BoxError, EventEnvelope, EventHandler, InMemoryEventBus};
use handling::{
    HandlingError, HandlingEventType, HandlingReport, HandlingService,
    InMemoryHandlingEventRepository,
};

type Service = HandlingService<InMemoryHandlingEventRepository, InMemoryEventBus>;

/// Records every payload it receives and optionally fails.
struct Recorder {
    seen: Mutex<Vec<serde_json::Value>>,
    fail: bool,
}

#[async_trait]
impl EventHandler for Recorder {
    fn name(&self) -> &'static str {
        "test.recorder"
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<(), BoxError> {
        self.seen.lock().unwrap().push(event.payload.clone());
        if self.fail {
            return Err("subscriber unavailable".into());
        }
        Ok(())
    }
}

async fn setup(fail: bool) -> (Service, Arc<Recorder>) {
    let bus = InMemoryEventBus::new();
    let recorder = Arc::new(Recorder {
        seen: Mutex::new(Vec::new()),
        fail,
    });
    bus.subscribe("HandlingEventRegistered", recorder.clone()).await;
    let service = HandlingService::new(InMemoryHandlingEventRepository::new(), bus);
    (service, recorder)
}

fn report(
    tracking_id: TrackingId,
    event_type: &str,
    at: &str,
    voyage: Option<&str>,
    hours_ago: i64,
) -> HandlingReport {
    HandlingReport::new(
        tracking_id.to_string(),
        event_type,
        at,
        voyage,
        Utc::now() - Duration::hours(hours_ago),
    )
}

#[tokio::test]
async fn subscribers_receive_flat_payloads() {
    let (service, recorder) = setup(false).await;
    let tracking_id = TrackingId::generate();

    service
        .submit_handling_report(report(tracking_id, "unload", "deham", Some("0100S"), 1))
        .await
        .unwrap();

    let seen = recorder.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["tracking_id"], tracking_id.to_string());
    assert_eq!(seen[0]["event_type"], "UNLOAD");
    assert_eq!(seen[0]["location"], "DEHAM");
    assert_eq!(seen[0]["voyage_number"], "0100S");
    assert!(seen[0]["completion_time"].is_string());
    assert!(seen[0]["registration_time"].is_string());
}

#[tokio::test]
async fn subscriber_failure_keeps_the_registration() {
    let (service, recorder) = setup(true).await;
    let tracking_id = TrackingId::generate();

    let err = service
        .submit_handling_report(report(tracking_id, "RECEIVE", "USNYC", None, 2))
        .await
        .unwrap_err();

    assert!(matches!(err, HandlingError::Publication(_)));
    assert_eq!(err.kind(), ErrorKind::Infrastructure);
    assert_eq!(recorder.seen.lock().unwrap().len(), 1);
    let history = service.get_handling_history(&tracking_id).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn history_follows_completion_time_not_submission_order() {
    let (service, _recorder) = setup(false).await;
    let tracking_id = TrackingId::generate();

    service
        .submit_handling_report(report(tracking_id, "UNLOAD", "DEHAM", Some("0100S"), 1))
        .await
        .unwrap();
    service
        .submit_handling_report(report(tracking_id, "LOAD", "USNYC", Some("0100S"), 48))
        .await
        .unwrap();
    service
        .submit_handling_report(report(tracking_id, "RECEIVE", "USNYC", None, 72))
        .await
        .unwrap();

    let history = service.get_handling_history(&tracking_id).await.unwrap();
    let types: Vec<_> = history.events().iter().map(|e| e.event_type()).collect();
    assert_eq!(
        types,
        vec![
            HandlingEventType::Receive,
            HandlingEventType::Load,
            HandlingEventType::Unload
        ]
    );
    assert!(history.has_been_received());
    assert_eq!(history.last_known_location().unwrap().as_str(), "DEHAM");
}
