//! Cargo status enums.

use serde::{Deserialize, Serialize};

/// Where the cargo physically is.
///
/// State transitions:
/// ```text
/// NotReceived ──► InPort ◄──► OnboardCarrier
///                   │               │
///                   └───────┬───────┘
///                           ▼
///                        Claimed
/// ```
/// `Unknown` is reported for handling types that say nothing about custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportStatus {
    /// Booked but not yet handed over to the carrier.
    #[default]
    NotReceived,

    /// In a port, between carrier movements.
    InPort,

    /// Loaded on a voyage.
    OnboardCarrier,

    /// Collected by the consignee (terminal state).
    Claimed,

    /// The last handling event did not determine custody.
    Unknown,
}

impl TransportStatus {
    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransportStatus::Claimed)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportStatus::NotReceived => "NOT_RECEIVED",
            TransportStatus::InPort => "IN_PORT",
            TransportStatus::OnboardCarrier => "ONBOARD_CARRIER",
            TransportStatus::Claimed => "CLAIMED",
            TransportStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the cargo has a plan, and whether it is following it.
///
/// ```text
/// NotRouted ──► Routed ◄──► Misdirected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingStatus {
    /// No itinerary assigned.
    #[default]
    NotRouted,

    /// Following the assigned itinerary.
    Routed,

    /// Handled somewhere the itinerary did not plan for.
    Misdirected,
}

impl RoutingStatus {
    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingStatus::NotRouted => "NOT_ROUTED",
            RoutingStatus::Routed => "ROUTED",
            RoutingStatus::Misdirected => "MISDIRECTED",
        }
    }
}

impl std::fmt::Display for RoutingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
