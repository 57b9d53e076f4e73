use std::sync::Arc;

use axum::extract::Path;
use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Router,
};
use tera::Context;
use validator::Validate;

use crate::data::models::{
    ApiError, ApiResponse, CreateDeckRequest, CreateDeckResponse, DeckListResponse,
    FlashcardListResponse, FlashcardView,
};
use crate::data::repositories::{DeckRepository, FlashcardRepository};
use crate::features::generation::{FlashcardGenerator, TextProcessor};
use crate::{utils, DbPool};

/// Minimum number of cards that must survive the quality filter before a
/// deck is worth saving.
const MIN_CARDS_PER_DECK: usize = 3;

type DeckState = (DbPool, Arc<FlashcardGenerator>);

pub async fn list_decks(
    State((pool, _)): State<DeckState>,
    session: tower_sessions::Session,
) -> Result<Json<DeckListResponse>, ApiError> {
    let user_id = utils::get_current_user_id(&session)
        .await
        .ok_or(ApiError::Unauthorized)?;

    let mut conn = pool.get().map_err(|e| {
        log::error!("Failed to get DB connection: {}", e);
        ApiError::Pool(e.to_string())
    })?;

    let decks = DeckRepository::list_for_user(&mut conn, user_id)?;
    Ok(Json(DeckListResponse { decks }))
}

pub async fn create_deck(
    State((pool, generator)): State<DeckState>,
    session: tower_sessions::Session,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<CreateDeckResponse>), ApiError> {
    let user_id = utils::get_current_user_id(&session)
        .await
        .ok_or(ApiError::Unauthorized)?;

    let payload = payload.trimmed();
    payload.validate()?;

    let processed = TextProcessor::preprocess_notes(&payload.notes);
    let cards = generator.generate(&processed).await;
    let cards = FlashcardGenerator::validate_quality(cards);

    if cards.len() < MIN_CARDS_PER_DECK {
        log::warn!(
            "Only {} usable cards generated for user {}, rejecting deck",
            cards.len(),
            user_id
        );
        return Err(ApiError::Generation(
            "Unable to generate sufficient flashcards from the provided notes".into(),
        ));
    }

    let mut conn = pool.get().map_err(|e| {
        log::error!("Failed to get DB connection: {}", e);
        ApiError::Pool(e.to_string())
    })?;

    let deck_id = DeckRepository::create_with_cards(
        &mut conn,
        user_id,
        &payload.title,
        payload.description.as_deref(),
        &payload.notes,
        &cards,
    )?;

    log::info!(
        "Created deck {} with {} flashcards for user {}",
        deck_id,
        cards.len(),
        user_id
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateDeckResponse {
            message: "Deck created successfully".into(),
            deck_id,
            flashcard_count: cards.len(),
            flashcards: cards,
        }),
    ))
}

pub async fn delete_deck(
    State((pool, _)): State<DeckState>,
    session: tower_sessions::Session,
    Path(deck_id): Path<i32>,
) -> Result<Json<ApiResponse>, ApiError> {
    let user_id = utils::get_current_user_id(&session)
        .await
        .ok_or(ApiError::Unauthorized)?;

    let mut conn = pool.get().map_err(|e| {
        log::error!("Failed to get DB connection: {}", e);
        ApiError::Pool(e.to_string())
    })?;

    if !DeckRepository::delete_owned(&mut conn, deck_id, user_id)? {
        return Err(ApiError::NotFound("Deck not found or access denied".into()));
    }

    log::info!("Deleted deck {} for user {}", deck_id, user_id);
    Ok(Json(ApiResponse {
        success: true,
        message: "Deck deleted successfully".to_string(),
    }))
}

pub async fn list_flashcards(
    State((pool, _)): State<DeckState>,
    session: tower_sessions::Session,
    Path(deck_id): Path<i32>,
) -> Result<Json<FlashcardListResponse>, ApiError> {
    let user_id = utils::get_current_user_id(&session)
        .await
        .ok_or(ApiError::Unauthorized)?;

    let mut conn = pool.get().map_err(|e| {
        log::error!("Failed to get DB connection: {}", e);
        ApiError::Pool(e.to_string())
    })?;

    if !DeckRepository::owned_by_user(&mut conn, deck_id, user_id)? {
        return Err(ApiError::NotFound("Deck not found or access denied".into()));
    }

    let flashcards = FlashcardRepository::list_for_deck(&mut conn, deck_id)?
        .into_iter()
        .map(FlashcardView::from)
        .collect();

    Ok(Json(FlashcardListResponse { flashcards }))
}

// Dashboard and deck creation pages

pub async fn dashboard_page(
    Extension(templates): Extension<Arc<tera::Tera>>,
    session: tower_sessions::Session,
) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("title", "My Decks");
    context.insert("logged_in", &utils::is_logged_in(&session).await);
    context.insert("username", &utils::get_current_username(&session).await);
    utils::render_template(&templates, "dashboard.html", context)
}

pub async fn create_page(
    Extension(templates): Extension<Arc<tera::Tera>>,
    session: tower_sessions::Session,
) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("title", "Create Deck");
    context.insert("logged_in", &utils::is_logged_in(&session).await);
    context.insert("username", &utils::get_current_username(&session).await);
    utils::render_template(&templates, "create.html", context)
}

pub fn deck_api_router(pool: DbPool, generator: Arc<FlashcardGenerator>) -> Router {
    Router::new()
        .route("/", get(list_decks).post(create_deck))
        .route("/{deck_id}", delete(delete_deck))
        .route("/{deck_id}/flashcards", get(list_flashcards))
        .with_state((pool, generator))
}
