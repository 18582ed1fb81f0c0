//! Handling event storage port and its in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::{RepositoryError, TrackingId};
use tokio::sync::RwLock;

use crate::{HandlingEvent, HandlingEventId};

/// Append-only storage for handling events.
#[async_trait]
pub trait HandlingEventRepository: Send + Sync {
    /// Appends an event.
    async fn store(&self, event: &HandlingEvent) -> Result<(), RepositoryError>;

    /// Finds a single event by its id.
    async fn find(&self, id: &HandlingEventId) -> Result<HandlingEvent, RepositoryError>;

    /// Returns the events of one cargo in registration order.
    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Vec<HandlingEvent>, RepositoryError>;

    /// Returns every event in registration order.
    async fn find_all(&self) -> Result<Vec<HandlingEvent>, RepositoryError>;
}

/// In-memory handling event log.
#[derive(Clone, Default)]
pub struct InMemoryHandlingEventRepository {
    events: Arc<RwLock<Vec<HandlingEvent>>>,
}

impl InMemoryHandlingEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl HandlingEventRepository for InMemoryHandlingEventRepository {
    async fn store(&self, event: &HandlingEvent) -> Result<(), RepositoryError> {
        let mut events = self.events.write().await;
        if events.iter().any(|e| e.id() == event.id()) {
            return Err(RepositoryError::Storage(format!(
                "handling event {} already stored",
                event.id()
            )));
        }
        events.push(event.clone());
        Ok(())
    }

    async fn find(&self, id: &HandlingEventId) -> Result<HandlingEvent, RepositoryError> {
        self.events
            .read()
            .await
            .iter()
            .find(|e| e.id() == *id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("HandlingEvent", id))
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Vec<HandlingEvent>, RepositoryError> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.tracking_id() == *tracking_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<HandlingEvent>, RepositoryError> {
        Ok(self.events.read().await.clone())
    }
}
