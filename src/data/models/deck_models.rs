use chrono::NaiveDateTime;
use diesel::result::Error as DieselError;
use diesel::{Queryable, Selectable};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::data::models::GeneratedCard;
use crate::schema::decks;

/// Errors shared by the deck and study JSON endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Generation(String),
    #[error("Database error")]
    Database(DieselError),
    #[error("Database error: {0}")]
    Pool(String),
    #[error("Session error: {0}")]
    Session(String),
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = decks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DeckRow {
    pub deck_id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub original_notes: String,
    pub created_at: NaiveDateTime,
}

/// Deck summary as listed on the dashboard.
#[derive(Debug, Serialize)]
pub struct Deck {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub flashcard_count: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct DeckListResponse {
    pub decks: Vec<Deck>,
}

/// Request payload for creating a new deck from raw notes.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeckRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 50, message = "Notes must be at least 50 characters"))]
    pub notes: String,
}

impl CreateDeckRequest {
    /// Normalize user input before validation. Whitespace-only fields
    /// must fail the length checks.
    pub fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.notes = self.notes.trim().to_string();
        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }
}

#[derive(Debug, Serialize)]
pub struct CreateDeckResponse {
    pub message: String,
    pub deck_id: i32,
    pub flashcard_count: usize,
    pub flashcards: Vec<GeneratedCard>,
}

/// Standard API response format
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}
