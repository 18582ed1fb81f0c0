//! Shared application state and its wiring.

use std::sync::Arc;

use booking::{
    BookingService, HANDLING_EVENT_REGISTERED, HandlingEventSubscriber, InMemoryCargoRepository,
    RoutingServiceAdapter,
};
use chrono::Utc;
use event_bus::InMemoryEventBus;
use handling::{HandlingService, InMemoryHandlingEventRepository};
use routing::{
    InMemoryLocationRepository, InMemoryVoyageRepository, RoutingError, RoutingService,
    SearchConfig,
};

use crate::config::Config;
use crate::seed;

pub type Routing = RoutingService<InMemoryVoyageRepository, InMemoryLocationRepository>;
pub type Booking =
    BookingService<InMemoryCargoRepository, RoutingServiceAdapter<Arc<Routing>>, InMemoryEventBus>;
pub type Handling = HandlingService<InMemoryHandlingEventRepository, InMemoryEventBus>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub routing: Arc<Routing>,
    pub booking: Arc<Booking>,
    pub handling: Handling,
    pub event_bus: InMemoryEventBus,
}

impl AppState {
    /// Wires the three contexts together over one event bus.
    ///
    /// Booking reaches routing through the routing adapter and learns about
    /// handling through its subscriber on the bus. With `event_log_capacity`
    /// set, the bus only retains that many published events for queries.
    pub async fn new(search: SearchConfig, event_log_capacity: Option<usize>) -> Self {
        let event_bus = event_log_capacity
            .map_or_else(InMemoryEventBus::new, InMemoryEventBus::with_log_capacity);
        let routing = Arc::new(RoutingService::new(
            InMemoryVoyageRepository::new(),
            InMemoryLocationRepository::new(),
            search,
        ));
        let booking = Arc::new(BookingService::new(
            InMemoryCargoRepository::new(),
            RoutingServiceAdapter::new(routing.clone()),
            event_bus.clone(),
        ));
        event_bus
            .subscribe(
                HANDLING_EVENT_REGISTERED,
                Arc::new(HandlingEventSubscriber::new(booking.clone())),
            )
            .await;
        let handling =
            HandlingService::new(InMemoryHandlingEventRepository::new(), event_bus.clone());

        Self {
            routing,
            booking,
            handling,
            event_bus,
        }
    }
}

/// Creates the application state described by `config`, seeding the demo
/// network when enabled.
pub async fn create_default_state(config: &Config) -> Result<Arc<AppState>, RoutingError> {
    let state = AppState::new(config.search.clone(), config.event_log_capacity).await;
    if config.seed_demo_network {
        seed::seed_demo_network(&state.routing, Utc::now()).await?;
    }
    Ok(Arc::new(state))
}
