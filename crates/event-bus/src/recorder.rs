//! Per-aggregate queue of events that have not been published yet.

use crate::DomainEvent;

/// Events recorded by an aggregate during a command, waiting to be drained
/// by the service that persists the aggregate.
///
/// The recorder is never part of an aggregate's equality or serialized form.
#[derive(Debug, Clone)]
pub struct EventRecorder<E: DomainEvent> {
    pending: Vec<E>,
}

impl<E: DomainEvent> EventRecorder<E> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Queues an event.
    pub fn record(&mut self, event: E) {
        self.pending.push(event);
    }

    /// Returns the queued events without removing them.
    pub fn pending(&self) -> &[E] {
        &self.pending
    }

    /// Removes and returns all queued events in recording order.
    pub fn take(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E: DomainEvent> Default for EventRecorder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainEvent> PartialEq for EventRecorder<E> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}
