//! Domain events and their in-process delivery.
//!
//! Bounded contexts never call each other's aggregates directly. An aggregate
//! records [`DomainEvent`]s in an [`EventRecorder`]; the owning service wraps
//! them in [`EventEnvelope`]s after its write and hands them to an
//! [`EventPublisher`]. The [`InMemoryEventBus`] fans each envelope out to the
//! [`EventHandler`]s subscribed to its exact event name.

pub mod error;
pub mod event;
pub mod handler;
pub mod publisher;
pub mod query;
pub mod recorder;

pub use error::{EventBusError, HandlerFailure, Result};
pub use event::{DomainEvent, EventEnvelope, EventEnvelopeBuilder, EventId};
pub use handler::{BoxError, EventHandler};
pub use publisher::{EventPublisher, EventPublisherExt, InMemoryEventBus};
pub use query::EventQuery;
pub use recorder::EventRecorder;
