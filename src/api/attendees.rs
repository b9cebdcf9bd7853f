//! Attendees API endpoint

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::Attendee, AppState};

/// List the attendees of a class day with parent contact details
#[utoipa::path(
    get,
    path = "/attendees/{product_id}",
    tag = "roster",
    params(("product_id" = String, Path, description = "Product (class day) ID")),
    responses(
        (status = 200, description = "Attendees ordered by child name", body = Vec<Attendee>),
        (status = 400, description = "Product ID is not a number", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_attendees(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Vec<Attendee>>> {
    let attendees = state.services.catalog.attendees(&product_id).await?;
    Ok(Json(attendees))
}
