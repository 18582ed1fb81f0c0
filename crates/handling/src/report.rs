//! Incoming handling reports as submitted by ports, terminals and agents.

use chrono::{DateTime, Utc};
use common::{TrackingId, UnLocode, VoyageNumber};
use serde::{Deserialize, Serialize};

use crate::error::{HandlingError, Result};
use crate::{HandlingEvent, HandlingEventType};

/// Raw handling report. Every field is still untrusted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlingReport {
    pub tracking_id: String,
    pub event_type: String,
    pub location: String,
    #[serde(default)]
    pub voyage_number: Option<String>,
    /// RFC3339 timestamp of when the handling happened.
    pub completion_time: String,
}

impl HandlingReport {
    pub fn new(
        tracking_id: impl Into<String>,
        event_type: impl Into<String>,
        location: impl Into<String>,
        voyage_number: Option<&str>,
        completion_time: DateTime<Utc>,
    ) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            event_type: event_type.into(),
            location: location.into(),
            voyage_number: voyage_number.map(str::to_string),
            completion_time: completion_time.to_rfc3339(),
        }
    }

    /// Parses the report into a handling event registered at `registered_at`.
    ///
    /// A blank voyage number counts as absent.
    pub fn parse(&self, registered_at: DateTime<Utc>) -> Result<HandlingEvent> {
        let tracking_id: TrackingId = self.tracking_id.parse()?;
        let event_type: HandlingEventType = self.event_type.parse()?;
        let location = UnLocode::new(&self.location)?;
        let voyage_number = match self.voyage_number.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Some(VoyageNumber::new(v)?),
            _ => None,
        };
        let completion_time = DateTime::parse_from_rfc3339(self.completion_time.trim())
            .map_err(|e| HandlingError::InvalidTimestamp {
                value: self.completion_time.clone(),
                reason: e.to_string(),
            })?
            .with_timezone(&Utc);

        HandlingEvent::new(
            tracking_id,
            event_type,
            location,
            voyage_number,
            completion_time,
            registered_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn report(event_type: &str, voyage: Option<&str>, completion: &str) -> HandlingReport {
        HandlingReport {
            tracking_id: TrackingId::generate().to_string(),
            event_type: event_type.to_string(),
            location: "usnyc".to_string(),
            voyage_number: voyage.map(str::to_string),
            completion_time: completion.to_string(),
        }
    }

    #[test]
    fn parses_a_valid_load_report() {
        let now = Utc::now();
        let completed = now - Duration::hours(1);
        let report = HandlingReport::new(
            TrackingId::generate().to_string(),
            "load",
            "USNYC",
            Some("0100S"),
            completed,
        );

        let event = report.parse(now).unwrap();
        assert_eq!(event.event_type(), HandlingEventType::Load);
        assert_eq!(event.voyage_number().unwrap().as_str(), "0100S");
        assert_eq!(event.completion_time(), completed);
        assert_eq!(event.registration_time(), now);
    }

    #[test]
    fn blank_voyage_counts_as_absent() {
        let event = report("RECEIVE", Some("  "), "2020-01-01T00:00:00Z")
            .parse(Utc::now())
            .unwrap();
        assert!(event.voyage_number().is_none());
        assert_eq!(event.location().as_str(), "USNYC");
    }

    #[test]
    fn non_utc_offsets_are_normalized() {
        let event = report("CUSTOMS", None, "2020-01-01T02:00:00+02:00")
            .parse(Utc::now())
            .unwrap();
        assert_eq!(event.completion_time().to_rfc3339(), "2020-01-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_bad_fields() {
        let now = Utc::now();
        assert!(matches!(
            report("RECEIVE", None, "yesterday").parse(now),
            Err(HandlingError::InvalidTimestamp { .. })
        ));
        assert!(matches!(
            report("DROP", None, "2020-01-01T00:00:00Z").parse(now),
            Err(HandlingError::UnknownEventType { .. })
        ));
        assert!(matches!(
            report("UNLOAD", None, "2020-01-01T00:00:00Z").parse(now),
            Err(HandlingError::MissingVoyage { .. })
        ));

        let mut bad_id = report("RECEIVE", None, "2020-01-01T00:00:00Z");
        bad_id.tracking_id = "not-a-tracking-id".to_string();
        assert!(matches!(bad_id.parse(now), Err(HandlingError::Validation(_))));
    }
}
