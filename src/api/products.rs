//! Products (class days) API endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{product::ProductQuery, Product},
    AppState,
};

/// List the class days of an event
#[utoipa::path(
    get,
    path = "/products",
    tag = "roster",
    params(ProductQuery),
    responses(
        (status = 200, description = "Class days with attendee counts", body = Vec<Product>),
        (status = 400, description = "eventId missing", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let event_id = query
        .event_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("eventId parameter is required".to_string()))?;

    let products = state.services.catalog.products(&event_id).await?;
    Ok(Json(products))
}
