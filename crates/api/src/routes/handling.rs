//! Handling report intake.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use handling::{HandlingEvent, HandlingReport};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /handling/reports: register a handling report.
///
/// The body is taken as loose strings; parsing and validation happen in the
/// handling service. A registered event updates the cargo's delivery through
/// the event bus before this returns.
#[tracing::instrument(skip(state, report))]
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(report): Json<HandlingReport>,
) -> Result<(StatusCode, Json<HandlingEvent>), ApiError> {
    let event = state.handling.submit_handling_report(report).await?;
    Ok((StatusCode::CREATED, Json(event)))
}
