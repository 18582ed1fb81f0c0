//! Booking's own view of a handling event.

use chrono::{DateTime, Utc};
use common::{TrackingId, UnLocode, VoyageNumber};
use serde::{Deserialize, Serialize};

/// Kind of physical handling, as booking understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandlingType {
    Receive,
    Load,
    Unload,
    Claim,
    Customs,
}

impl HandlingType {
    /// Parses a handling type name, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "RECEIVE" => Some(HandlingType::Receive),
            "LOAD" => Some(HandlingType::Load),
            "UNLOAD" => Some(HandlingType::Unload),
            "CLAIM" => Some(HandlingType::Claim),
            "CUSTOMS" => Some(HandlingType::Customs),
            _ => None,
        }
    }
}

/// What booking needs to know about one handling event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlingSummary {
    pub tracking_id: TrackingId,
    pub handling_type: HandlingType,
    pub location: UnLocode,
    pub voyage_number: Option<VoyageNumber>,
    pub completed_at: DateTime<Utc>,
}
