//! Session gate and login flow, driven in process.
//!
//! The pool connects lazily, so none of these requests reach a database.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use class_roster::{
    config::{AppConfig, AuthConfig},
    create_router,
    session::{SessionSigner, SESSION_COOKIE},
    AppState,
};

const PASSWORD: &str = "glitter-glue";

fn app(password: Option<&str>) -> Router {
    let config = AppConfig {
        auth: AuthConfig {
            app_password: password.map(str::to_string),
            session_hours: 24,
        },
        ..AppConfig::default()
    };
    let pool = PgPoolOptions::new().connect_lazy_with(config.database.connect_options());
    create_router(AppState::new(config, pool))
}

fn valid_cookie() -> String {
    let expires = Utc::now().timestamp_millis() + 60_000;
    let token = SessionSigner::new(PASSWORD).generate_token(expires);
    format!("{}={}", SESSION_COOKIE, token)
}

fn login_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookie(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_login_sets_day_long_cookie() {
    let body = json!({ "password": PASSWORD }).to_string();
    let response = app(Some(PASSWORD)).oneshot(login_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).expect("session cookie");
    assert!(cookie.starts_with(&format!("{}=", SESSION_COOKIE)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(!cookie.contains("Secure"));

    let token = cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value.to_string())
        .unwrap();
    let signer = SessionSigner::new(PASSWORD);
    let now = Utc::now().timestamp_millis();
    assert!(signer.validate_token(&token, now));
    assert!(signer.validate_token(&token, now + 23 * 60 * 60 * 1000));
    assert!(!signer.validate_token(&token, now + 25 * 60 * 60 * 1000));

    assert_eq!(json_body(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let body = json!({ "password": "crayons" }).to_string();
    let response = app(Some(PASSWORD)).oneshot(login_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).is_none());
    assert_eq!(json_body(response).await, json!({ "error": "Invalid password" }));
}

#[tokio::test]
async fn test_login_missing_password() {
    for body in ["{}", "{\"password\": \"\"}", "not json", ""] {
        let response = app(Some(PASSWORD)).oneshot(login_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(json_body(response).await, json!({ "error": "Password required" }));
    }
}

#[tokio::test]
async fn test_login_unconfigured() {
    let body = json!({ "password": PASSWORD }).to_string();
    let response = app(None).oneshot(login_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(set_cookie(&response).is_none());
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Authentication not configured" })
    );
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    let response = app(Some(PASSWORD)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).expect("removal cookie");
    assert!(cookie.starts_with(&format!("{}=;", SESSION_COOKIE)));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_api_requires_session() {
    let response = app(Some(PASSWORD)).oneshot(get("/api/events", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_expired_or_forged_session_rejected() {
    let expired = SessionSigner::new(PASSWORD).generate_token(Utc::now().timestamp_millis() - 1);
    let forged = SessionSigner::new("guess").generate_token(Utc::now().timestamp_millis() + 60_000);

    for token in [expired, forged] {
        let cookie = format!("{}={}", SESSION_COOKIE, token);
        let response = app(Some(PASSWORD))
            .oneshot(get("/api/roster", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_pages_redirect_to_login() {
    let response = app(Some(PASSWORD))
        .oneshot(get("/?event=3&ticket=12", None))
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers()[header::LOCATION],
        "/login?from=%2F%3Fevent%3D3%26ticket%3D12"
    );
}

#[tokio::test]
async fn test_login_page_drops_offsite_return() {
    for uri in ["/login?from=//evil.example", "/login?from=%2F%5Cevil.example"] {
        let response = app(Some(PASSWORD)).oneshot(get(uri, None)).await.unwrap();
        assert!(response.status().is_redirection(), "{} was not redirected", uri);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    let response = app(Some(PASSWORD))
        .oneshot(get("/login?from=%2F%3Fevent%3D3", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_public_paths_open() {
    let response = app(Some(PASSWORD)).oneshot(get("/login", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(Some(PASSWORD)).oneshot(get("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");

    let response = app(Some(PASSWORD))
        .oneshot(get("/manifest.webmanifest", None))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["short_name"], "CC Attendance");
}

#[tokio::test]
async fn test_unconfigured_secret_fails_closed() {
    let response = app(None).oneshot(get("/api/events", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Server configuration error" })
    );

    let response = app(None).oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app(None).oneshot(get("/login", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_reaches_handlers() {
    let cookie = valid_cookie();

    let response = app(Some(PASSWORD)).oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(Some(PASSWORD))
        .oneshot(get("/api/products", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "eventId parameter is required" })
    );

    let response = app(Some(PASSWORD))
        .oneshot(get("/api/attendees/pizza", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
