//! Roster view endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, Utc};

use crate::{
    error::AppResult,
    services::roster::{RosterQuery, RosterView},
    AppState,
};

/// Resolve the staff page for a selection: event, class day and search.
/// Missing or unknown ids fall back to the current event and today's class.
#[utoipa::path(
    get,
    path = "/roster",
    tag = "roster",
    params(RosterQuery),
    responses(
        (status = 200, description = "Roster view", body = RosterView)
    )
)]
pub async fn get_roster(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> AppResult<Json<RosterView>> {
    let today = Local::now().date_naive();
    let view = state.services.roster.view(&query, Utc::now(), today).await?;
    Ok(Json(view))
}
