use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use log;

use crate::{
    DbPool,
    utils::set_user_session,
    data::repositories::UserRepository
};
use crate::data::models::{ApiResponse, LoginError, LoginRequest, LoginResponse, UserView};

#[axum::debug_handler]
pub async fn handle_login(
    State(pool): State<DbPool>,
    session: tower_sessions::Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, LoginError> {
    let mut conn = pool.get()
        .map_err(|e| {
            log::error!("Failed to get DB connection: {}", e);
            LoginError::SessionError("Failed to get DB connection".into())
        })?;

    let user = UserRepository::find_by_username(&mut conn, &payload.username)
        .map_err(|e| {
            log::error!("Database error during login: {}", e);
            LoginError::DatabaseError(e)
        })?;

    match user {
        Some(user) => {
            let is_valid = UserRepository::verify_password(&user.password, &payload.password)
                .map_err(|e| {
                    log::error!("Password verification failed: {}", e);
                    LoginError::HashingError(e)
                })?;

            if is_valid {
                set_user_session(&session, user.user_id, &user.username).await?;
                log::info!("User logged in: {}", user.username);
                Ok(Json(LoginResponse {
                    message: "Login successful".into(),
                    user: UserView::from(&user),
                }))
            } else {
                log::warn!("Invalid password for user: {}", payload.username);
                Err(LoginError::InvalidCredentials)
            }
        },
        None => {
            log::warn!("User not found: {}", payload.username);
            Err(LoginError::InvalidCredentials)
        }
    }
}

#[axum::debug_handler]
pub async fn handle_logout(
    session: tower_sessions::Session,
) -> Result<Json<ApiResponse>, LoginError> {
    session.delete().await.map_err(|e| {
        log::error!("Failed to delete session: {}", e);
        LoginError::SessionError("Failed to logout".into())
    })?;
    Ok(Json(ApiResponse {
        success: true,
        message: "Logout successful".to_string(),
    }))
}

pub fn auth_router(pool: DbPool) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .with_state(pool)
}
