use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;
use tera::Context;

use crate::utils;

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn home(
    Extension(templates): Extension<Arc<tera::Tera>>,
    session: tower_sessions::Session,
) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("title", "Study Buddy");
    context.insert("logged_in", &utils::is_logged_in(&session).await);
    context.insert("username", &utils::get_current_username(&session).await);
    utils::render_template(&templates, "home.html", context)
}

pub async fn login_page(
    Extension(templates): Extension<Arc<tera::Tera>>,
    session: tower_sessions::Session,
) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("title", "Login");
    context.insert("logged_in", &utils::is_logged_in(&session).await);
    context.insert("username", &utils::get_current_username(&session).await);
    utils::render_template(&templates, "login.html", context)
}

pub async fn register_page(
    Extension(templates): Extension<Arc<tera::Tera>>,
    session: tower_sessions::Session,
) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("title", "Register");
    context.insert("logged_in", &utils::is_logged_in(&session).await);
    context.insert("username", &utils::get_current_username(&session).await);
    utils::render_template(&templates, "register.html", context)
}
