//! Cargo booking, routing and tracking endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use booking::{AssignRoute, BookCargo, BookingError, CargoDetails, Itinerary, Leg};
use chrono::{DateTime, Utc};
use common::{TrackingId, UnLocode, VoyageNumber};
use event_bus::{EventEnvelope, EventQuery};
use handling::HandlingHistory;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct BookCargoRequest {
    pub origin: String,
    pub destination: String,
    pub arrival_deadline: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct AssignRouteRequest {
    pub legs: Vec<LegRequest>,
}

#[derive(Deserialize)]
pub struct LegRequest {
    pub voyage_number: String,
    pub load_location: String,
    pub unload_location: String,
    pub load_time: DateTime<Utc>,
    pub unload_time: DateTime<Utc>,
}

impl AssignRouteRequest {
    fn into_itinerary(self) -> Result<Itinerary, ApiError> {
        let legs = self
            .legs
            .into_iter()
            .map(|leg| -> Result<Leg, ApiError> {
                let leg = Leg::new(
                    VoyageNumber::new(&leg.voyage_number)?,
                    UnLocode::new(&leg.load_location)?,
                    UnLocode::new(&leg.unload_location)?,
                    leg.load_time,
                    leg.unload_time,
                )
                .map_err(BookingError::from)?;
                Ok(leg)
            })
            .collect::<Result<Vec<Leg>, ApiError>>()?;
        Itinerary::new(legs).map_err(|e| BookingError::from(e).into())
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct CargoBookedResponse {
    pub tracking_id: TrackingId,
}

// -- Handlers --

/// POST /cargos: book a new cargo.
#[tracing::instrument(skip(state, req))]
pub async fn book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookCargoRequest>,
) -> Result<(StatusCode, Json<CargoBookedResponse>), ApiError> {
    let cmd = BookCargo::new(
        UnLocode::new(&req.origin)?,
        UnLocode::new(&req.destination)?,
        req.arrival_deadline,
    );
    let tracking_id = state.booking.book_new_cargo(cmd).await?;
    Ok((StatusCode::CREATED, Json(CargoBookedResponse { tracking_id })))
}

/// GET /cargos/unrouted: cargos still waiting for an itinerary.
#[tracing::instrument(skip(state))]
pub async fn list_unrouted(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CargoDetails>>, ApiError> {
    Ok(Json(state.booking.list_unrouted_cargo().await?))
}

/// GET /cargos/{id}: current view of a cargo.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CargoDetails>, ApiError> {
    let tracking_id = parse_tracking_id(&id)?;
    Ok(Json(state.booking.get_cargo_details(&tracking_id).await?))
}

/// GET /cargos/{id}/routes: itineraries that satisfy the cargo's route
/// specification, best first.
#[tracing::instrument(skip(state))]
pub async fn route_candidates(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Itinerary>>, ApiError> {
    let tracking_id = parse_tracking_id(&id)?;
    let candidates = state.booking.request_route_candidates(&tracking_id).await?;
    Ok(Json(candidates))
}

/// POST /cargos/{id}/route: assign an itinerary to a cargo.
#[tracing::instrument(skip(state, req))]
pub async fn assign_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AssignRouteRequest>,
) -> Result<Json<CargoDetails>, ApiError> {
    let tracking_id = parse_tracking_id(&id)?;
    let itinerary = req.into_itinerary()?;
    state
        .booking
        .assign_route_to_cargo(AssignRoute::new(tracking_id, itinerary))
        .await?;
    Ok(Json(state.booking.get_cargo_details(&tracking_id).await?))
}

/// GET /cargos/{id}/handling: the cargo's handling history.
#[tracing::instrument(skip(state))]
pub async fn handling_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<HandlingHistory>, ApiError> {
    let tracking_id = parse_tracking_id(&id)?;
    let history = state.handling.get_handling_history(&tracking_id).await?;
    Ok(Json(history))
}

/// GET /cargos/{id}/events: events published by the cargo aggregate.
#[tracing::instrument(skip(state))]
pub async fn events(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<EventEnvelope>>, ApiError> {
    let tracking_id = parse_tracking_id(&id)?;
    // Unknown ids answer 404 rather than an empty list.
    state.booking.get_cargo_details(&tracking_id).await?;
    let events = state
        .event_bus
        .query(&EventQuery::for_aggregate(tracking_id))
        .await;
    Ok(Json(events))
}

fn parse_tracking_id(id: &str) -> Result<TrackingId, ApiError> {
    id.parse::<TrackingId>().map_err(ApiError::from)
}
