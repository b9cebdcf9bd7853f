//! Staff pages and the web app manifest

use axum::{
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::is_local_path;

const INDEX_PAGE: &str = include_str!("../../static/index.html");
const LOGIN_PAGE: &str = include_str!("../../static/login.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

#[derive(Deserialize)]
pub struct LoginPageQuery {
    from: Option<String>,
}

/// Login form; an off-site `from` is dropped before the page loads
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Response {
    match query.from {
        Some(from) if !is_local_path(&from) => Redirect::to("/login").into_response(),
        _ => Html(LOGIN_PAGE).into_response(),
    }
}

pub async fn manifest() -> Json<Value> {
    Json(json!({
        "name": "Creative Collab Attendance",
        "short_name": "CC Attendance",
        "description": "Attendance reporting for Creative Collab art classes",
        "start_url": "/",
        "display": "standalone",
        "background_color": "#ffffff",
        "theme_color": "#000000",
        "orientation": "portrait-primary",
    }))
}
