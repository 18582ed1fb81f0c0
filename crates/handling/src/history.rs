//! Read-only view of a cargo's handling events.

use common::{UnLocode, VoyageNumber};
use serde::Serialize;

use crate::{HandlingEvent, HandlingEventType};

/// All handling events of one cargo, ordered by completion time.
///
/// Events completed at the same instant keep their registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HandlingHistory {
    events: Vec<HandlingEvent>,
}

impl HandlingHistory {
    /// Builds a history from events in registration order.
    pub fn new(mut events: Vec<HandlingEvent>) -> Self {
        events.sort_by_key(HandlingEvent::completion_time);
        Self { events }
    }

    /// Returns the events in order.
    pub fn events(&self) -> &[HandlingEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the most recently completed event.
    pub fn most_recent(&self) -> Option<&HandlingEvent> {
        self.events.last()
    }

    /// Returns true if any event has the given type.
    pub fn contains(&self, event_type: HandlingEventType) -> bool {
        self.events.iter().any(|e| e.event_type() == event_type)
    }

    pub fn has_been_received(&self) -> bool {
        self.contains(HandlingEventType::Receive)
    }

    pub fn has_been_claimed(&self) -> bool {
        self.contains(HandlingEventType::Claim)
    }

    /// Where the cargo was last handled.
    pub fn last_known_location(&self) -> Option<&UnLocode> {
        self.most_recent().map(HandlingEvent::location)
    }

    /// The voyage of the most recent event that named one.
    pub fn last_voyage(&self) -> Option<&VoyageNumber> {
        self.events.iter().rev().find_map(HandlingEvent::voyage_number)
    }

    /// Events that happened at `location`.
    pub fn at_location<'a>(
        &'a self,
        location: &'a UnLocode,
    ) -> impl Iterator<Item = &'a HandlingEvent> + 'a {
        self.events.iter().filter(move |e| e.location() == location)
    }

    /// Events of the given type.
    pub fn of_type(&self, event_type: HandlingEventType) -> impl Iterator<Item = &HandlingEvent> {
        self.events
            .iter()
            .filter(move |e| e.event_type() == event_type)
    }
}
