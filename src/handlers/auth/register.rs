use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use validator::Validate;

use crate::{
    DbPool,
    utils::set_user_session,
    data::repositories::UserRepository,
    data::models::{RegisterError, RegisterRequest, RegisterResponse}
};

#[axum::debug_handler]
pub async fn handle_register(
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), RegisterError> {
    payload.validate().map_err(RegisterError::from)?;

    let mut conn = pool.get()
        .map_err(|e| {
            log::error!("Failed to get DB connection: {}", e);
            RegisterError::SessionError("Failed to get DB connection".into())
        })?;

    if UserRepository::account_exists(&mut conn, &payload.username, &payload.email)? {
        log::warn!("Registration attempt with existing account: {}", payload.username);
        return Err(RegisterError::AccountExists);
    }

    let user = UserRepository::create_user(&mut conn, &payload.username, &payload.email, &payload.password)
        .map_err(|e| {
            log::error!("User creation failed: {}", e);
            RegisterError::DatabaseError(e)
        })?;

    set_user_session(&session, user.user_id, &user.username)
        .await
        .map_err(|e| {
            log::error!("Failed to set session: {:?}", e);
            RegisterError::SessionError("Failed to set user session".into())
        })?;

    log::info!("New user registered: {}", user.username);
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            user_id: user.user_id,
        }),
    ))
}

pub fn auth_router(pool: DbPool) -> Router {
    Router::new()
        .route("/register", post(handle_register))
        .with_state(pool)
}
