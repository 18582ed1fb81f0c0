//! Customer/supplier adapter from booking to the routing context.
//!
//! Booking speaks of route specifications, itineraries and legs; routing speaks
//! of its own specifications, transit paths and edges. This adapter is the only
//! place where the two meet.

use async_trait::async_trait;
use routing::{RoutingError, RoutingPort, TransitPath};

use crate::cargo::{Itinerary, Leg, RouteSpecification};
use crate::error::BookingError;
use crate::service::RoutingGateway;

/// Calls the routing context synchronously and translates both ways.
pub struct RoutingServiceAdapter<R: RoutingPort> {
    routing: R,
}

impl<R: RoutingPort> RoutingServiceAdapter<R> {
    /// Wraps a routing port.
    pub fn new(routing: R) -> Self {
        Self { routing }
    }
}

#[async_trait]
impl<R: RoutingPort> RoutingGateway for RoutingServiceAdapter<R> {
    async fn fetch_routes_for(
        &self,
        spec: &RouteSpecification,
    ) -> Result<Vec<Itinerary>, BookingError> {
        let request = routing::RouteSpecification::new(
            spec.origin().clone(),
            spec.destination().clone(),
            spec.arrival_deadline(),
        )
        .map_err(from_routing)?;

        let paths = self
            .routing
            .find_optimal_itineraries(&request)
            .await
            .map_err(from_routing)?;

        paths.into_iter().map(to_itinerary).collect()
    }
}

/// One leg per hop, carrying the hop's voyage number.
fn to_itinerary(path: TransitPath) -> Result<Itinerary, BookingError> {
    let legs = path
        .into_edges()
        .into_iter()
        .map(|edge| {
            Leg::new(
                edge.voyage_number,
                edge.from,
                edge.to,
                edge.departure,
                edge.arrival,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Itinerary::new(legs)?)
}

fn from_routing(e: RoutingError) -> BookingError {
    BookingError::Routing {
        kind: e.kind(),
        message: e.to_string(),
    }
}
