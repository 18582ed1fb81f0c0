//! Booking service: the booking context's primary port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::TrackingId;
use event_bus::{EventPublisher, EventPublisherExt};
use serde::Serialize;

use crate::aggregate::Aggregate;
use crate::cargo::{
    AssignRoute, BookCargo, Cargo, Delivery, Itinerary, RouteSpecification, RoutingStatus,
    UpdateDelivery,
};
use crate::error::BookingError;
use crate::repository::CargoRepository;

/// What booking needs from the routing context.
#[async_trait]
pub trait RoutingGateway: Send + Sync {
    /// Returns itineraries that may satisfy `spec`. An empty list means no
    /// route exists.
    async fn fetch_routes_for(
        &self,
        spec: &RouteSpecification,
    ) -> Result<Vec<Itinerary>, BookingError>;
}

/// Read model of a cargo for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct CargoDetails {
    pub tracking_id: TrackingId,
    pub route_specification: RouteSpecification,
    pub itinerary: Option<Itinerary>,
    pub delivery: Delivery,
    pub estimated_time_of_arrival: Option<DateTime<Utc>>,
    pub misdirected: bool,
    pub delivered: bool,
    pub can_be_rerouted: bool,
    pub ready_for_pickup: bool,
    pub overdue: bool,
}

impl CargoDetails {
    /// Builds the view of `cargo` as of `now`.
    pub fn of(cargo: &Cargo, now: DateTime<Utc>) -> Self {
        Self {
            tracking_id: cargo.tracking_id(),
            route_specification: cargo.route_specification().clone(),
            itinerary: cargo.itinerary().cloned(),
            delivery: cargo.delivery().clone(),
            estimated_time_of_arrival: cargo.estimated_time_of_arrival(),
            misdirected: cargo.is_misdirected(),
            delivered: cargo.is_delivered(),
            can_be_rerouted: cargo.can_be_rerouted(),
            ready_for_pickup: cargo.is_ready_for_pickup(now),
            overdue: cargo.is_overdue(now),
        }
    }
}

/// Service for booking and tracking cargo.
///
/// Each operation loads the cargo, applies one aggregate command, writes the
/// cargo back and then publishes the events it recorded. A publication failure
/// is reported after the write; the write is not undone.
pub struct BookingService<R: CargoRepository, G: RoutingGateway, P: EventPublisher> {
    cargos: R,
    routing: G,
    publisher: P,
}

impl<R: CargoRepository, G: RoutingGateway, P: EventPublisher> BookingService<R, G, P> {
    /// Creates a new booking service.
    pub fn new(cargos: R, routing: G, publisher: P) -> Self {
        Self {
            cargos,
            routing,
            publisher,
        }
    }

    /// Returns the cargo repository.
    pub fn repository(&self) -> &R {
        &self.cargos
    }

    /// Books a new cargo and returns its tracking ID.
    #[tracing::instrument(skip(self), fields(origin = %cmd.origin, destination = %cmd.destination))]
    pub async fn book_new_cargo(&self, cmd: BookCargo) -> Result<TrackingId, BookingError> {
        let now = Utc::now();
        let spec = RouteSpecification::new(cmd.origin, cmd.destination, cmd.arrival_deadline, now)?;
        let tracking_id = TrackingId::generate();
        let mut cargo = Cargo::book(tracking_id, spec, now);

        let envelopes = cargo.take_envelopes()?;
        self.cargos.store(&cargo).await?;
        metrics::counter!("cargo_booked_total").increment(1);
        tracing::info!(%tracking_id, "cargo booked");

        self.publisher.publish_all(envelopes).await?;
        Ok(tracking_id)
    }

    /// Assigns an itinerary to a cargo.
    #[tracing::instrument(skip(self, cmd), fields(tracking_id = %cmd.tracking_id))]
    pub async fn assign_route_to_cargo(&self, cmd: AssignRoute) -> Result<(), BookingError> {
        let mut cargo = self.cargos.find(&cmd.tracking_id).await?;
        let legs = cmd.itinerary.legs().len();
        cargo.assign_to_route(cmd.itinerary, Utc::now())?;

        let envelopes = cargo.take_envelopes()?;
        self.cargos.update(&cargo).await?;
        metrics::counter!("cargo_routed_total").increment(1);
        tracing::info!(legs, "route assigned");

        self.publisher.publish_all(envelopes).await?;
        Ok(())
    }

    /// Returns the presentation view of a cargo.
    #[tracing::instrument(skip(self))]
    pub async fn get_cargo_details(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<CargoDetails, BookingError> {
        let cargo = self.cargos.find(tracking_id).await?;
        Ok(CargoDetails::of(&cargo, Utc::now()))
    }

    /// Returns every cargo that has no itinerary yet.
    #[tracing::instrument(skip(self))]
    pub async fn list_unrouted_cargo(&self) -> Result<Vec<CargoDetails>, BookingError> {
        let now = Utc::now();
        Ok(self
            .cargos
            .find_all()
            .await?
            .iter()
            .filter(|c| c.delivery().routing_status() == RoutingStatus::NotRouted)
            .map(|c| CargoDetails::of(c, now))
            .collect())
    }

    /// Asks routing for itineraries and keeps those that satisfy the cargo's
    /// current route specification.
    #[tracing::instrument(skip(self))]
    pub async fn request_route_candidates(
        &self,
        tracking_id: &TrackingId,
    ) -> Result<Vec<Itinerary>, BookingError> {
        let cargo = self.cargos.find(tracking_id).await?;
        let spec = cargo.route_specification();

        let offered = self.routing.fetch_routes_for(spec).await?;
        let offered_count = offered.len();
        let candidates: Vec<Itinerary> = offered
            .into_iter()
            .filter(|itinerary| itinerary.satisfies(spec))
            .collect();

        if candidates.len() < offered_count {
            tracing::warn!(
                dropped = offered_count - candidates.len(),
                "routing offered itineraries that do not satisfy the route specification"
            );
        }
        tracing::debug!(candidates = candidates.len(), "route candidates found");
        Ok(candidates)
    }

    /// Recomputes a cargo's delivery from handling summaries.
    ///
    /// Returns `false` if the delivery state did not change; nothing is written
    /// or published in that case.
    #[tracing::instrument(skip(self, cmd), fields(tracking_id = %cmd.tracking_id))]
    pub async fn update_cargo_delivery(&self, cmd: UpdateDelivery) -> Result<bool, BookingError> {
        let mut cargo = self.cargos.find(&cmd.tracking_id).await?;
        if !cargo.derive_delivery_progress(&cmd.summaries, Utc::now())? {
            tracing::debug!("delivery unchanged");
            return Ok(false);
        }

        let envelopes = cargo.take_envelopes()?;
        self.cargos.update(&cargo).await?;
        let delivery = cargo.delivery();
        metrics::counter!(
            "cargo_delivery_updates_total",
            "routing_status" => delivery.routing_status().as_str()
        )
        .increment(1);
        tracing::info!(
            transport_status = %delivery.transport_status(),
            routing_status = %delivery.routing_status(),
            "delivery updated"
        );

        self.publisher.publish_all(envelopes).await?;
        Ok(true)
    }
}
