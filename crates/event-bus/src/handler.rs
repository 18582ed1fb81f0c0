//! Subscriber side of the bus.

use async_trait::async_trait;

use crate::EventEnvelope;

/// Error type returned by handlers. The bus only renders it.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Reacts to published events of the names it was subscribed to.
///
/// Delivery is at-least-once, so handlers must tolerate seeing the same
/// envelope more than once.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Returns the name of this handler, used in failure reports.
    fn name(&self) -> &'static str;

    /// Handles a single event.
    async fn handle(&self, event: &EventEnvelope) -> Result<(), BoxError>;
}
