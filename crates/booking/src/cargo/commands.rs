//! Cargo commands.

use chrono::{DateTime, Utc};
use common::{TrackingId, UnLocode};

use super::{HandlingSummary, Itinerary};

/// Command to book a new cargo.
#[derive(Debug, Clone)]
pub struct BookCargo {
    pub origin: UnLocode,
    pub destination: UnLocode,
    pub arrival_deadline: DateTime<Utc>,
}

impl BookCargo {
    /// Creates a new BookCargo command.
    pub fn new(origin: UnLocode, destination: UnLocode, arrival_deadline: DateTime<Utc>) -> Self {
        Self {
            origin,
            destination,
            arrival_deadline,
        }
    }
}

/// Command to assign an itinerary to a cargo.
#[derive(Debug, Clone)]
pub struct AssignRoute {
    pub tracking_id: TrackingId,
    pub itinerary: Itinerary,
}

impl AssignRoute {
    /// Creates a new AssignRoute command.
    pub fn new(tracking_id: TrackingId, itinerary: Itinerary) -> Self {
        Self {
            tracking_id,
            itinerary,
        }
    }
}

/// Command to recompute a cargo's delivery from handling summaries.
#[derive(Debug, Clone)]
pub struct UpdateDelivery {
    pub tracking_id: TrackingId,

    /// Summaries in completion order; the last one decides the new status.
    pub summaries: Vec<HandlingSummary>,
}

impl UpdateDelivery {
    /// Creates a new UpdateDelivery command.
    pub fn new(tracking_id: TrackingId, summaries: Vec<HandlingSummary>) -> Self {
        Self {
            tracking_id,
            summaries,
        }
    }

    /// Creates a command carrying a single summary.
    pub fn single(summary: HandlingSummary) -> Self {
        Self {
            tracking_id: summary.tracking_id,
            summaries: vec![summary],
        }
    }
}
