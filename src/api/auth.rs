//! Authentication endpoints (shared staff password)

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    session::SESSION_COOKIE,
    AppState,
};

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
}

/// Exchange the shared password for a session cookie
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session cookie set", body = AuthResponse),
        (status = 400, description = "Password missing", body = crate::error::ErrorResponse),
        (status = 401, description = "Wrong password", body = crate::error::ErrorResponse),
        (status = 500, description = "Authentication not configured", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let password = body
        .ok()
        .and_then(|Json(request)| request.password)
        .ok_or_else(|| AppError::BadRequest("Password required".to_string()))?;

    let auth = &state.services.auth;
    let token = auth.login(&password, Utc::now())?;

    let max_age = time::Duration::seconds(auth.session_duration().num_seconds());
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(state.config.server.production)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .path("/");

    tracing::info!("Staff session started");
    Ok((jar.add(cookie), Json(AuthResponse { success: true })))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = AuthResponse)
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<AuthResponse>) {
    // An explicit expired cookie, sent even when the request carried none
    let cleared = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO);
    (jar.add(cleared), Json(AuthResponse { success: true }))
}
