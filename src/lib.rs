//! Class Roster
//!
//! A read-only lookup service for art-class event staff: pick an event and a
//! class day, then browse the children booked on it with their parents'
//! contact details. Access is gated by a shared password and a signed,
//! time-limited session cookie.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::{Pool, Postgres};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod roster;
pub mod services;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub pool: Pool<Postgres>,
}

impl AppState {
    pub fn new(config: AppConfig, pool: Pool<Postgres>) -> Self {
        let repository = repository::Repository::new(pool.clone());
        let services = services::Services::new(repository, &config.auth);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
            pool,
        }
    }
}

/// Create the application router with all routes behind the session gate
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health_check))
        .route("/health/ready", get(api::health::readiness_check))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/logout", post(api::auth::logout))
        .route("/events", get(api::events::list_events))
        .route("/products", get(api::products::list_products))
        .route("/attendees/:product_id", get(api::attendees::list_attendees))
        .route("/roster", get(api::roster::get_roster));

    Router::new()
        .route("/", get(api::pages::index))
        .route("/login", get(api::pages::login_page))
        .route("/manifest.webmanifest", get(api::pages::manifest))
        .nest("/api", api_routes)
        .with_state(state.clone())
        .merge(api::openapi::create_openapi_router())
        .layer(middleware::from_fn_with_state(state, api::require_session))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
