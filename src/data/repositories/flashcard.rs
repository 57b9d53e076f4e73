use diesel::prelude::*;

use crate::data::models::Flashcard;
use crate::schema::flashcards;

pub struct FlashcardRepository;

impl FlashcardRepository {
    /// Cards of a deck in insertion order.
    pub fn list_for_deck(
        conn: &mut SqliteConnection,
        deck_id: i32,
    ) -> Result<Vec<Flashcard>, diesel::result::Error> {
        flashcards::table
            .filter(flashcards::deck_id.eq(deck_id))
            .order(flashcards::flashcard_id.asc())
            .load::<Flashcard>(conn)
    }
}
