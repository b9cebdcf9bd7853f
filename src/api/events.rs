//! Events API endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, models::Event, AppState};

/// List live events, most recent first
#[utoipa::path(
    get,
    path = "/events",
    tag = "roster",
    responses(
        (status = 200, description = "Live events", body = Vec<Event>),
        (status = 500, description = "Query failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = state.services.catalog.events().await?;
    Ok(Json(events))
}
