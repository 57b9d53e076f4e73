use std::sync::Arc;

use axum::extract::Path;
use axum::{
    extract::{Extension, Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use tera::Context;
use tower_sessions::Session;

use crate::data::models::{ApiError, JumpRequest, StartStudyRequest, StudyStateView};
use crate::data::repositories::{DeckRepository, FlashcardRepository};
use crate::features::study::{StudyCard, StudySession};
use crate::{utils, DbPool};

const STUDY_SESSION_KEY: &str = "study_session";

async fn load_study(session: &Session) -> Result<StudySession, ApiError> {
    session
        .get::<StudySession>(STUDY_SESSION_KEY)
        .await
        .map_err(|e| ApiError::Session(e.to_string()))?
        .ok_or_else(|| ApiError::Validation("No active study session".into()))
}

async fn save_study(session: &Session, study: &StudySession) -> Result<(), ApiError> {
    session
        .insert(STUDY_SESSION_KEY, study)
        .await
        .map_err(|e| ApiError::Session(e.to_string()))
}

/// Load the deck's cards into a fresh study session. Replaces any
/// session left over from a previous deck.
#[axum::debug_handler]
pub async fn start_study(
    State(pool): State<DbPool>,
    session: Session,
    Json(payload): Json<StartStudyRequest>,
) -> Result<Json<StudyStateView>, ApiError> {
    let user_id = utils::get_current_user_id(&session)
        .await
        .ok_or(ApiError::Unauthorized)?;

    let mut conn = pool.get().map_err(|e| {
        log::error!("Failed to get DB connection: {}", e);
        ApiError::Pool(e.to_string())
    })?;

    if !DeckRepository::owned_by_user(&mut conn, payload.deck_id, user_id)? {
        return Err(ApiError::NotFound("Deck not found or access denied".into()));
    }

    let cards: Vec<StudyCard> = FlashcardRepository::list_for_deck(&mut conn, payload.deck_id)?
        .into_iter()
        .map(StudyCard::from)
        .collect();

    let study = StudySession::new(payload.deck_id, cards);
    save_study(&session, &study).await?;

    log::info!(
        "Started study session for deck {} ({} cards)",
        payload.deck_id,
        study.len()
    );
    Ok(Json(study.view()))
}

pub async fn study_state(session: Session) -> Result<Json<StudyStateView>, ApiError> {
    let study = load_study(&session).await?;
    Ok(Json(study.view()))
}

/// Flip the current card. Flips inside the transition window are
/// dropped; the returned state tells the client which side is up.
pub async fn flip_card(session: Session) -> Result<Json<StudyStateView>, ApiError> {
    let mut study = load_study(&session).await?;
    study.flip(Utc::now());
    save_study(&session, &study).await?;
    Ok(Json(study.view()))
}

pub async fn next_card(session: Session) -> Result<Json<StudyStateView>, ApiError> {
    let mut study = load_study(&session).await?;
    study.next();
    save_study(&session, &study).await?;
    Ok(Json(study.view()))
}

pub async fn previous_card(session: Session) -> Result<Json<StudyStateView>, ApiError> {
    let mut study = load_study(&session).await?;
    study.previous();
    save_study(&session, &study).await?;
    Ok(Json(study.view()))
}

pub async fn jump_to_card(
    session: Session,
    Json(payload): Json<JumpRequest>,
) -> Result<Json<StudyStateView>, ApiError> {
    let mut study = load_study(&session).await?;
    study.jump_to(payload.index);
    save_study(&session, &study).await?;
    Ok(Json(study.view()))
}

pub async fn shuffle_cards(session: Session) -> Result<Json<StudyStateView>, ApiError> {
    let mut study = load_study(&session).await?;
    study.toggle_shuffle(&mut rand::thread_rng());
    save_study(&session, &study).await?;
    Ok(Json(study.view()))
}

pub async fn reset_study(session: Session) -> Result<Json<StudyStateView>, ApiError> {
    let mut study = load_study(&session).await?;
    study.reset();
    save_study(&session, &study).await?;
    Ok(Json(study.view()))
}

// Study page

pub async fn study_page(
    Path(deck_id): Path<i32>,
    Extension(templates): Extension<Arc<tera::Tera>>,
    session: Session,
) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("title", "Study");
    context.insert("deck_id", &deck_id);
    context.insert("logged_in", &utils::is_logged_in(&session).await);
    context.insert("username", &utils::get_current_username(&session).await);
    utils::render_template(&templates, "study.html", context)
}

pub fn study_api_router(pool: DbPool) -> Router {
    Router::new()
        .route("/start", post(start_study))
        .route("/state", get(study_state))
        .route("/flip", post(flip_card))
        .route("/next", post(next_card))
        .route("/previous", post(previous_card))
        .route("/jump", post(jump_to_card))
        .route("/shuffle", post(shuffle_cards))
        .route("/reset", post(reset_study))
        .with_state(pool)
}
