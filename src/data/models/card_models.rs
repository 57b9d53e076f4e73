use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::flashcards;

/// Difficulty rating attached to every flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a stored level. Unknown values fall back to `Medium`.
    pub fn from_level(level: &str) -> Difficulty {
        match level {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

/// A freshly generated card, before it is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCard {
    pub question: String,
    pub answer: String,
    #[serde(rename = "difficulty_level")]
    pub difficulty: Difficulty,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = flashcards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Flashcard {
    pub flashcard_id: i32,
    pub deck_id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty_level: String,
}

#[derive(Insertable)]
#[diesel(table_name = flashcards)]
pub struct NewFlashcard<'a> {
    pub deck_id: i32,
    pub question: &'a str,
    pub answer: &'a str,
    pub difficulty_level: &'a str,
}

/// Flashcard as returned by the API.
#[derive(Debug, Serialize)]
pub struct FlashcardView {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty_level: String,
}

impl From<Flashcard> for FlashcardView {
    fn from(card: Flashcard) -> Self {
        FlashcardView {
            id: card.flashcard_id,
            question: card.question,
            answer: card.answer,
            difficulty_level: card.difficulty_level,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlashcardListResponse {
    pub flashcards: Vec<FlashcardView>,
}
