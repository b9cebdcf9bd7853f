//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{attendees, auth, events, health, products, roster};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Class Roster API",
        version = "0.3.0",
        description = "Read-only attendee lookup for art-class event staff",
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        health::health_check,
        health::readiness_check,
        auth::login,
        auth::logout,
        events::list_events,
        products::list_products,
        attendees::list_attendees,
        roster::get_roster,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::AuthResponse,
            crate::models::Event,
            crate::models::Product,
            crate::models::product::ProductQuery,
            crate::models::Attendee,
            crate::services::roster::RosterQuery,
            crate::services::roster::RosterView,
            crate::services::roster::EventOption,
            crate::services::roster::ClassDay,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Shared-password session endpoints"),
        (name = "roster", description = "Events, class days and attendees")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
