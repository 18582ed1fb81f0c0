//! Handling events: immutable records of physical cargo handling.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::{TrackingId, UnLocode, VoyageNumber};
use event_bus::DomainEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HandlingError, Result};

/// Unique identifier for a handling event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlingEventId(Uuid);

impl HandlingEventId {
    /// Creates a new random ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for HandlingEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HandlingEventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of physical handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandlingEventType {
    /// Carrier took custody at the origin.
    Receive,
    /// Loaded onto a voyage.
    Load,
    /// Unloaded from a voyage.
    Unload,
    /// Consignee collected the cargo.
    Claim,
    /// Passed customs.
    Customs,
}

impl HandlingEventType {
    /// Returns true if this type must name a voyage; all others must not.
    pub fn requires_voyage(&self) -> bool {
        matches!(self, HandlingEventType::Load | HandlingEventType::Unload)
    }

    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlingEventType::Receive => "RECEIVE",
            HandlingEventType::Load => "LOAD",
            HandlingEventType::Unload => "UNLOAD",
            HandlingEventType::Claim => "CLAIM",
            HandlingEventType::Customs => "CUSTOMS",
        }
    }
}

impl std::fmt::Display for HandlingEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandlingEventType {
    type Err = HandlingError;

    /// Parses a type name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RECEIVE" => Ok(HandlingEventType::Receive),
            "LOAD" => Ok(HandlingEventType::Load),
            "UNLOAD" => Ok(HandlingEventType::Unload),
            "CLAIM" => Ok(HandlingEventType::Claim),
            "CUSTOMS" => Ok(HandlingEventType::Customs),
            _ => Err(HandlingError::UnknownEventType {
                value: s.to_string(),
            }),
        }
    }
}

/// A single handling of a cargo. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlingEvent {
    id: HandlingEventId,
    tracking_id: TrackingId,
    event_type: HandlingEventType,
    location: UnLocode,
    voyage_number: Option<VoyageNumber>,
    completion_time: DateTime<Utc>,
    registration_time: DateTime<Utc>,
}

impl HandlingEvent {
    /// Creates a handling event.
    ///
    /// LOAD and UNLOAD require a voyage and the other types forbid one. The
    /// completion time may not be later than the registration time.
    pub fn new(
        tracking_id: TrackingId,
        event_type: HandlingEventType,
        location: UnLocode,
        voyage_number: Option<VoyageNumber>,
        completion_time: DateTime<Utc>,
        registration_time: DateTime<Utc>,
    ) -> Result<Self> {
        match (event_type.requires_voyage(), &voyage_number) {
            (true, None) => return Err(HandlingError::MissingVoyage { event_type }),
            (false, Some(_)) => return Err(HandlingError::UnexpectedVoyage { event_type }),
            _ => {}
        }
        if completion_time > registration_time {
            return Err(HandlingError::CompletionInFuture {
                completion: completion_time,
                registration: registration_time,
            });
        }
        Ok(Self {
            id: HandlingEventId::new(),
            tracking_id,
            event_type,
            location,
            voyage_number,
            completion_time,
            registration_time,
        })
    }

    pub fn id(&self) -> HandlingEventId {
        self.id
    }

    pub fn tracking_id(&self) -> TrackingId {
        self.tracking_id
    }

    pub fn event_type(&self) -> HandlingEventType {
        self.event_type
    }

    pub fn location(&self) -> &UnLocode {
        &self.location
    }

    pub fn voyage_number(&self) -> Option<&VoyageNumber> {
        self.voyage_number.as_ref()
    }

    pub fn completion_time(&self) -> DateTime<Utc> {
        self.completion_time
    }

    pub fn registration_time(&self) -> DateTime<Utc> {
        self.registration_time
    }

    /// Returns the integration event announcing this registration.
    pub fn registered(&self) -> HandlingEventRegistered {
        HandlingEventRegistered {
            event_id: self.id,
            tracking_id: self.tracking_id,
            event_type: self.event_type,
            location: self.location.clone(),
            voyage_number: self.voyage_number.clone(),
            completion_time: self.completion_time,
            registration_time: self.registration_time,
        }
    }
}

/// Published once per stored handling event.
///
/// Serialized flat so consumers can decode it into their own shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlingEventRegistered {
    pub event_id: HandlingEventId,
    pub tracking_id: TrackingId,
    pub event_type: HandlingEventType,
    pub location: UnLocode,
    pub voyage_number: Option<VoyageNumber>,
    pub completion_time: DateTime<Utc>,
    pub registration_time: DateTime<Utc>,
}

impl DomainEvent for HandlingEventRegistered {
    fn event_name(&self) -> &'static str {
        "HandlingEventRegistered"
    }
}
