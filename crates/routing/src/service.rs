//! Routing service: the primary port other contexts call.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::{
    Location, LocationRepository, RouteSpecification, RoutingError, ScheduleGraph, SearchConfig,
    TransitPath, Voyage, VoyageRepository,
};

/// Primary port of the routing context.
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Returns every path satisfying `spec`, best first. An empty list means
    /// no route exists; it is not an error.
    async fn find_optimal_itineraries(
        &self,
        spec: &RouteSpecification,
    ) -> Result<Vec<TransitPath>, RoutingError>;
}

#[async_trait]
impl<T: RoutingPort + ?Sized> RoutingPort for Arc<T> {
    async fn find_optimal_itineraries(
        &self,
        spec: &RouteSpecification,
    ) -> Result<Vec<TransitPath>, RoutingError> {
        (**self).find_optimal_itineraries(spec).await
    }
}

/// Service for managing the transport network and searching it.
pub struct RoutingService<V: VoyageRepository, L: LocationRepository> {
    voyages: V,
    locations: L,
    config: SearchConfig,
}

impl<V: VoyageRepository, L: LocationRepository> RoutingService<V, L> {
    /// Creates a new routing service.
    pub fn new(voyages: V, locations: L, config: SearchConfig) -> Self {
        Self {
            voyages,
            locations,
            config,
        }
    }

    /// Returns the search bounds in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Adds a location to the network.
    #[tracing::instrument(skip(self, location), fields(code = %location.code()))]
    pub async fn register_location(&self, location: Location) -> Result<(), RoutingError> {
        self.locations.store(location).await?;
        Ok(())
    }

    /// Adds a voyage to the network.
    ///
    /// Every location the voyage calls at must already be registered.
    #[tracing::instrument(skip(self, voyage), fields(voyage_number = %voyage.number()))]
    pub async fn register_voyage(&self, voyage: Voyage) -> Result<(), RoutingError> {
        for movement in voyage.schedule().movements() {
            self.locations.find(movement.departure_location()).await?;
            self.locations.find(movement.arrival_location()).await?;
        }
        self.voyages.store(voyage).await?;
        Ok(())
    }

    /// Returns every known location.
    pub async fn list_locations(&self) -> Result<Vec<Location>, RoutingError> {
        Ok(self.locations.find_all().await?)
    }

    /// Returns every known voyage.
    pub async fn list_voyages(&self) -> Result<Vec<Voyage>, RoutingError> {
        Ok(self.voyages.find_all().await?)
    }

    async fn is_known(&self, spec: &RouteSpecification) -> Result<bool, RoutingError> {
        for code in [spec.origin(), spec.destination()] {
            match self.locations.find(code).await {
                Ok(_) => {}
                Err(common::RepositoryError::NotFound { .. }) => return Ok(false),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl<V: VoyageRepository, L: LocationRepository> RoutingPort for RoutingService<V, L> {
    #[tracing::instrument(
        skip(self, spec),
        fields(origin = %spec.origin(), destination = %spec.destination())
    )]
    async fn find_optimal_itineraries(
        &self,
        spec: &RouteSpecification,
    ) -> Result<Vec<TransitPath>, RoutingError> {
        if !self.is_known(spec).await? {
            tracing::debug!("origin or destination is not a known location");
            return Ok(Vec::new());
        }

        let voyages = self.voyages.find_all().await?;
        let started = Instant::now();
        let graph = ScheduleGraph::from_voyages(&voyages);
        let outcome = graph.find_paths(spec, &self.config);

        metrics::histogram!("routing_search_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        metrics::histogram!("routing_candidates_found").record(outcome.candidates_found as f64);

        if outcome.truncated {
            tracing::warn!(
                expansions = outcome.expansions,
                "itinerary search hit its expansion budget"
            );
        }
        tracing::info!(
            candidates = outcome.candidates_found,
            returned = outcome.paths.len(),
            expansions = outcome.expansions,
            "itinerary search complete"
        );

        Ok(outcome.paths)
    }
}
