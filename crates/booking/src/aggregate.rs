//! Aggregate root trait.

use std::fmt::Display;

use event_bus::{DomainEvent, EventEnvelope};

/// Trait for aggregate roots that record domain events.
///
/// An aggregate is changed only through its own methods. Each successful
/// change records the events describing it; the service that persists the
/// aggregate drains them and publishes them after the write.
pub trait Aggregate: Send + Sync {
    /// The identity type.
    type Id: Display;

    /// The type of events this aggregate records.
    type Event: DomainEvent;

    /// Returns the aggregate type name used on published envelopes.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's identity.
    fn id(&self) -> &Self::Id;

    /// Removes and returns the events recorded since the last call.
    fn take_events(&mut self) -> Vec<Self::Event>;

    /// Drains the recorded events and wraps each in an envelope.
    fn take_envelopes(&mut self) -> event_bus::Result<Vec<EventEnvelope>> {
        let id = self.id().to_string();
        self.take_events()
            .iter()
            .map(|event| EventEnvelope::from_event(Self::aggregate_type(), &id, event))
            .collect()
    }
}
