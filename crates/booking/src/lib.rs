//! Booking context for the cargo shipping system.
//!
//! This crate provides:
//! - the Cargo aggregate with its route specification, itinerary and delivery
//!   state machine
//! - BookingService, the context's primary port
//! - adapters to the routing context (synchronous) and from the handling
//!   context (event-driven)

pub mod adapters;
pub mod aggregate;
pub mod cargo;
pub mod error;
pub mod repository;
pub mod service;

pub use adapters::{HANDLING_EVENT_REGISTERED, HandlingEventSubscriber, RoutingServiceAdapter};
pub use aggregate::Aggregate;
pub use cargo::{
    AssignRoute, BookCargo, Cargo, CargoBookedData, CargoDeliveryUpdatedData, CargoError,
    CargoEvent, CargoRoutedData, Delivery, HandlingSummary, HandlingType, Itinerary, Leg,
    RouteSpecification, RoutingStatus, TransportStatus, UpdateDelivery,
};
pub use error::BookingError;
pub use repository::{CargoRepository, InMemoryCargoRepository};
pub use service::{BookingService, CargoDetails, RoutingGateway};
