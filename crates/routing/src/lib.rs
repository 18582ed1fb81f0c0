//! Routing context: the scheduled transport network and itinerary search.
//!
//! - [`Voyage`], [`Schedule`] and [`CarrierMovement`] model the network and
//!   validate connectivity and timing when they are built
//! - [`ScheduleGraph`] is a frozen snapshot of all voyages, searched for
//!   [`TransitPath`]s that satisfy a [`RouteSpecification`]
//! - [`RoutingService`] is the primary port offered to other contexts

pub mod config;
pub mod error;
pub mod location;
pub mod path;
pub mod repository;
pub mod search;
pub mod service;
pub mod voyage;

pub use config::SearchConfig;
pub use error::RoutingError;
pub use location::Location;
pub use path::{RouteSpecification, TransitEdge, TransitPath};
pub use repository::{
    InMemoryLocationRepository, InMemoryVoyageRepository, LocationRepository, VoyageRepository,
};
pub use search::{ScheduleGraph, SearchOutcome};
pub use service::{RoutingPort, RoutingService};
pub use voyage::{CarrierMovement, Schedule, Voyage, VoyageBuilder};
