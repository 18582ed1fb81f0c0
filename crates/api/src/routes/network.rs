//! Read-only views of the transport network.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use routing::{Location, Voyage};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /locations: every registered location.
#[tracing::instrument(skip(state))]
pub async fn locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Location>>, ApiError> {
    Ok(Json(state.routing.list_locations().await?))
}

/// GET /voyages: every registered voyage with its schedule.
#[tracing::instrument(skip(state))]
pub async fn voyages(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Voyage>>, ApiError> {
    Ok(Json(state.routing.list_voyages().await?))
}
