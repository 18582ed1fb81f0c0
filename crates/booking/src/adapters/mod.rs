//! Translation layers between booking and the other contexts.

mod handling;
mod routing;

pub use handling::{HANDLING_EVENT_REGISTERED, HandlingEventSubscriber};
pub use routing::RoutingServiceAdapter;
