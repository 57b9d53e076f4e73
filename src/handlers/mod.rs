pub mod auth;
pub mod decks;
pub mod pages;
pub mod study;

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, get_service},
    Router,
};
use tera::Tera;
use time::Duration;
use tower_http::services::ServeDir;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::features::generation::FlashcardGenerator;
use crate::DbPool;

/// Assemble the full application router. Used by the binary and the
/// integration tests.
pub fn build_router(
    pool: DbPool,
    generator: Arc<FlashcardGenerator>,
    templates: Arc<Tera>,
) -> Router {
    // Sessions configuration
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_secure(false);

    // Auth router
    let auth_router = Router::new()
        .merge(auth::login::auth_router(pool.clone()))
        .merge(auth::register::auth_router(pool.clone()));

    // Combined API router
    let api_router = Router::new()
        .route("/health", get(pages::health))
        .nest("/auth", auth_router)
        .nest("/decks", decks::decks::deck_api_router(pool.clone(), generator))
        .nest("/study", study::study::study_api_router(pool.clone()));

    Router::new()
        // Static pages
        .route("/", get(pages::home))
        .route("/login", get(pages::login_page))
        .route("/register", get(pages::register_page))
        // Dashboard and deck pages
        .route("/dashboard", get(decks::decks::dashboard_page))
        .route("/create", get(decks::decks::create_page))
        .route("/decks/{deck_id}/study", get(study::study::study_page))
        // API routes
        .nest("/api", api_router)
        // Static files
        .nest_service("/static", get_service(ServeDir::new("static")))
        // Shared state and layers
        .layer(Extension(templates))
        .layer(session_layer)
}
