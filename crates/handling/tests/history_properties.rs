//! Property tests for handling history ordering.

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{TrackingId, UnLocode};
use handling::{HandlingEvent, HandlingEventType, HandlingHistory};
use proptest::prelude::*;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
}

fn customs(tracking_id: TrackingId, minute: i64) -> HandlingEvent {
    HandlingEvent::new(
        tracking_id,
        HandlingEventType::Customs,
        UnLocode::new("DEHAM").unwrap(),
        None,
        epoch() + Duration::minutes(minute),
        epoch() + Duration::days(1),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn history_is_sorted_and_ties_keep_registration_order(
        minutes in prop::collection::vec(0i64..20, 0..30),
    ) {
        let tracking_id = TrackingId::generate();
        let registered: Vec<HandlingEvent> =
            minutes.iter().map(|m| customs(tracking_id, *m)).collect();

        let history = HandlingHistory::new(registered.clone());

        prop_assert_eq!(history.len(), registered.len());
        for pair in history.events().windows(2) {
            prop_assert!(pair[0].completion_time() <= pair[1].completion_time());
            if pair[0].completion_time() == pair[1].completion_time() {
                let first = registered.iter().position(|e| e.id() == pair[0].id());
                let second = registered.iter().position(|e| e.id() == pair[1].id());
                prop_assert!(first < second);
            }
        }
        if let Some(max) = minutes.iter().max() {
            let latest = history.most_recent().unwrap();
            prop_assert_eq!(latest.completion_time(), epoch() + Duration::minutes(*max));
        }
    }
}
