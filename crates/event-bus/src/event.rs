use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{EventBusError, Result};

/// Unique identifier for a published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an event ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for domain events.
///
/// Domain events are facts, named in past tense. The event name is the exact
/// string subscribers register against.
pub trait DomainEvent: Serialize + Send + Sync + Clone {
    /// Returns the event name used for dispatch.
    fn event_name(&self) -> &'static str;
}

/// A published event together with its routing metadata.
///
/// The envelope is the only shape that crosses a context boundary; the
/// payload is plain JSON so consumers decode it into their own types.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EventEnvelope {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// The name of the event (e.g. "CargoRouted").
    pub event_name: String,

    /// The type of aggregate that produced the event (e.g. "Cargo").
    pub aggregate_type: String,

    /// Identity of the producing aggregate, rendered as a string.
    pub aggregate_id: String,

    /// When the event was published.
    pub occurred_at: DateTime<Utc>,

    /// The event payload as JSON.
    pub payload: serde_json::Value,

    /// Additional metadata about the event.
    pub metadata: HashMap<String, serde_json::Value>,
}

impl EventEnvelope {
    /// Creates a new event envelope builder.
    pub fn builder() -> EventEnvelopeBuilder {
        EventEnvelopeBuilder::default()
    }

    /// Wraps a domain event produced by the given aggregate.
    pub fn from_event<E: DomainEvent>(
        aggregate_type: &str,
        aggregate_id: impl ToString,
        event: &E,
    ) -> Result<Self> {
        EventEnvelope::builder()
            .event_name(event.event_name())
            .aggregate_type(aggregate_type)
            .aggregate_id(aggregate_id)
            .payload(event)?
            .build()
    }

    /// Decodes the payload into a consumer-owned type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}

/// Builder for constructing event envelopes.
#[derive(Debug, Default)]
pub struct EventEnvelopeBuilder {
    event_id: Option<EventId>,
    event_name: Option<String>,
    aggregate_type: Option<String>,
    aggregate_id: Option<String>,
    occurred_at: Option<DateTime<Utc>>,
    payload: Option<serde_json::Value>,
    metadata: HashMap<String, serde_json::Value>,
}

impl EventEnvelopeBuilder {
    /// Sets the event ID. If not set, a new ID will be generated.
    pub fn event_id(mut self, id: EventId) -> Self {
        self.event_id = Some(id);
        self
    }

    /// Sets the event name.
    pub fn event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = Some(event_name.into());
        self
    }

    /// Sets the aggregate type.
    pub fn aggregate_type(mut self, aggregate_type: impl Into<String>) -> Self {
        self.aggregate_type = Some(aggregate_type.into());
        self
    }

    /// Sets the aggregate ID.
    pub fn aggregate_id(mut self, id: impl ToString) -> Self {
        self.aggregate_id = Some(id.to_string());
        self
    }

    /// Sets the timestamp. If not set, the current time will be used.
    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    /// Sets the payload from a serializable value.
    pub fn payload<T: Serialize>(mut self, payload: &T) -> Result<Self> {
        self.payload = Some(serde_json::to_value(payload)?);
        Ok(self)
    }

    /// Sets the payload from a raw JSON value.
    pub fn payload_raw(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Adds a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Builds the envelope, failing if a required field is missing.
    pub fn build(self) -> Result<EventEnvelope> {
        Ok(EventEnvelope {
            event_id: self.event_id.unwrap_or_default(),
            event_name: self
                .event_name
                .ok_or(EventBusError::IncompleteEnvelope("event_name"))?,
            aggregate_type: self
                .aggregate_type
                .ok_or(EventBusError::IncompleteEnvelope("aggregate_type"))?,
            aggregate_id: self
                .aggregate_id
                .ok_or(EventBusError::IncompleteEnvelope("aggregate_id"))?,
            occurred_at: self.occurred_at.unwrap_or_else(Utc::now),
            payload: self
                .payload
                .ok_or(EventBusError::IncompleteEnvelope("payload"))?,
            metadata: self.metadata,
        })
    }
}
