//! Event publication and the in-memory bus.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{EventBusError, EventEnvelope, EventHandler, EventQuery, HandlerFailure, Result};

/// Port through which services publish events after their write.
///
/// Publication gives no persistence or retry guarantee.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a single event to every subscriber of its name.
    ///
    /// Returns `HandlersFailed` if any subscriber failed; the others still ran.
    async fn publish(&self, event: EventEnvelope) -> Result<()>;
}

/// Extension trait providing convenience methods for publishers.
#[async_trait]
pub trait EventPublisherExt: EventPublisher {
    /// Publishes events in order. Every event is published even if an earlier
    /// one reported failures; the first failure is returned.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<()> {
        let mut first_error = None;
        for event in events {
            if let Err(e) = self.publish(event).await
                && first_error.is_none()
            {
                first_error = Some(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<T: EventPublisher + ?Sized> EventPublisherExt for T {}

#[async_trait]
impl<T: EventPublisher + ?Sized> EventPublisher for Arc<T> {
    async fn publish(&self, event: EventEnvelope) -> Result<()> {
        (**self).publish(event).await
    }
}

type Subscriptions = HashMap<String, Vec<Arc<dyn EventHandler>>>;

/// In-process event bus.
///
/// Dispatch is by exact event name. Handlers run sequentially in subscription
/// order inside the `publish` call, so handler latency adds up.
///
/// Every published envelope is appended to a log that can be inspected with
/// [`EventQuery`]. A bus built with [`InMemoryEventBus::new`] keeps the whole
/// log for its lifetime; [`InMemoryEventBus::with_log_capacity`] keeps only
/// the most recent envelopes.
#[derive(Clone, Default)]
pub struct InMemoryEventBus {
    subscriptions: Arc<RwLock<Subscriptions>>,
    log: Arc<RwLock<VecDeque<EventEnvelope>>>,
    log_capacity: Option<usize>,
}

impl InMemoryEventBus {
    /// Creates a bus with no subscribers and an unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus whose log retains at most `capacity` envelopes, dropping
    /// the oldest first. Dispatch is unaffected.
    pub fn with_log_capacity(capacity: usize) -> Self {
        Self {
            log_capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Registers a handler for the given event name.
    pub async fn subscribe(&self, event_name: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let event_name = event_name.into();
        tracing::debug!(%event_name, handler = handler.name(), "handler subscribed");
        self.subscriptions
            .write()
            .await
            .entry(event_name)
            .or_default()
            .push(handler);
    }

    /// Returns the number of handlers subscribed to an event name.
    pub async fn handler_count(&self, event_name: &str) -> usize {
        self.subscriptions
            .read()
            .await
            .get(event_name)
            .map_or(0, Vec::len)
    }

    /// Returns every retained envelope, in publication order.
    pub async fn published(&self) -> Vec<EventEnvelope> {
        self.log.read().await.iter().cloned().collect()
    }

    /// Returns the number of retained envelopes.
    pub async fn published_count(&self) -> usize {
        self.log.read().await.len()
    }

    /// Returns the published envelopes matching a query, in publication order.
    pub async fn query(&self, query: &EventQuery) -> Vec<EventEnvelope> {
        query.apply(self.log.read().await.iter())
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    #[tracing::instrument(
        skip(self, event),
        fields(event_name = %event.event_name, aggregate_id = %event.aggregate_id)
    )]
    async fn publish(&self, event: EventEnvelope) -> Result<()> {
        {
            let mut log = self.log.write().await;
            log.push_back(event.clone());
            if let Some(capacity) = self.log_capacity {
                while log.len() > capacity {
                    log.pop_front();
                }
            }
        }
        metrics::counter!("events_published_total", "event" => event.event_name.clone())
            .increment(1);

        // Snapshot the handler list so handlers may publish in turn.
        let handlers: Vec<Arc<dyn EventHandler>> = self
            .subscriptions
            .read()
            .await
            .get(&event.event_name)
            .cloned()
            .unwrap_or_default();

        let mut failures = Vec::new();
        for handler in &handlers {
            if let Err(e) = handler.handle(&event).await {
                tracing::warn!(handler = handler.name(), error = %e, "event handler failed");
                metrics::counter!("event_handler_failures_total", "handler" => handler.name())
                    .increment(1);
                failures.push(HandlerFailure {
                    handler: handler.name(),
                    reason: e.to_string(),
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(EventBusError::HandlersFailed {
                event_name: event.event_name,
                attempted: handlers.len(),
                failures,
            })
        }
    }
}
