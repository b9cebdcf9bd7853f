//! API handlers and the session gate

pub mod attendees;
pub mod auth;
pub mod events;
pub mod health;
pub mod openapi;
pub mod pages;
pub mod products;
pub mod roster;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::{error::ErrorResponse, session::SESSION_COOKIE, AppState};

/// Paths reachable without a session, including their sub-paths
pub const PUBLIC_PATHS: [&str; 5] = [
    "/login",
    "/api/auth/login",
    "/api/auth/logout",
    "/api/health",
    "/manifest.webmanifest",
];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| {
        path == *public
            || path
                .strip_prefix(public)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Gate every non-public route behind a valid session cookie.
///
/// API calls get JSON errors; page navigations are sent to the login page
/// with the requested path and query in `from`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if is_public_path(path) {
        return next.run(request).await;
    }

    let is_api = path.starts_with("/api/");
    let auth = &state.services.auth;

    if !auth.is_configured() {
        tracing::error!("APP_PASSWORD is not set, refusing {}", path);
        let message = "Server configuration error".to_string();
        return if is_api {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: message })).into_response()
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        };
    }

    let authenticated = jar
        .get(SESSION_COOKIE)
        .is_some_and(|cookie| auth.validate(cookie.value(), Utc::now()));

    if authenticated {
        return next.run(request).await;
    }

    if is_api {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Unauthorized".to_string(),
            }),
        )
            .into_response();
    }

    let from = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .filter(|pq| !pq.is_empty())
        .unwrap_or("/");
    Redirect::to(&login_redirect(from)).into_response()
}

/// `/login?from=<from>`, with `from` form-encoded
pub fn login_redirect(from: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("from", from)
        .finish();
    format!("/login?{}", query)
}

/// Whether `from` stays on this site: a single leading slash, not `//host`
/// or `/\host`, which browsers treat as another origin.
pub fn is_local_path(from: &str) -> bool {
    from.starts_with('/') && !from.starts_with("//") && !from.starts_with("/\\")
}
