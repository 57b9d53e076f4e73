use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sql_types::Integer;

use crate::data::models::{Deck, DeckRow, GeneratedCard, NewFlashcard};
use crate::schema::{decks, flashcards};

pub struct DeckRepository;

impl DeckRepository {
    /// List the user's decks, newest first, with per-deck card counts
    /// from a single grouped query.
    pub fn list_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<Deck>, diesel::result::Error> {
        let rows = decks::table
            .filter(decks::user_id.eq(user_id))
            .order(decks::created_at.desc())
            .load::<DeckRow>(conn)?;

        let deck_ids: Vec<i32> = rows.iter().map(|d| d.deck_id).collect();
        let counts: HashMap<i32, i64> = flashcards::table
            .filter(flashcards::deck_id.eq_any(deck_ids))
            .group_by(flashcards::deck_id)
            .select((flashcards::deck_id, diesel::dsl::count(flashcards::flashcard_id)))
            .load::<(i32, i64)>(conn)?
            .into_iter()
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| Deck {
                flashcard_count: counts.get(&row.deck_id).copied().unwrap_or(0),
                id: row.deck_id,
                title: row.title,
                description: row.description,
                created_at: row.created_at,
            })
            .collect())
    }

    /// Insert a deck and its generated cards in one transaction, returning
    /// the new deck id.
    pub fn create_with_cards(
        conn: &mut SqliteConnection,
        user_id: i32,
        title: &str,
        description: Option<&str>,
        original_notes: &str,
        cards: &[GeneratedCard],
    ) -> Result<i32, diesel::result::Error> {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(decks::table)
                .values((
                    decks::user_id.eq(user_id),
                    decks::title.eq(title),
                    decks::description.eq(description),
                    decks::original_notes.eq(original_notes),
                ))
                .execute(conn)?;

            let deck_id = diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
                .get_result::<i32>(conn)?;

            let rows: Vec<NewFlashcard> = cards
                .iter()
                .map(|card| NewFlashcard {
                    deck_id,
                    question: &card.question,
                    answer: &card.answer,
                    difficulty_level: card.difficulty.as_str(),
                })
                .collect();

            diesel::insert_into(flashcards::table)
                .values(&rows)
                .execute(conn)?;

            Ok(deck_id)
        })
    }

    pub fn owned_by_user(
        conn: &mut SqliteConnection,
        deck_id: i32,
        user_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        let count = decks::table
            .filter(decks::deck_id.eq(deck_id))
            .filter(decks::user_id.eq(user_id))
            .count()
            .get_result::<i64>(conn)?;
        Ok(count > 0)
    }

    /// Delete a deck and its flashcards. Returns `false` when the deck does
    /// not exist or belongs to another user.
    pub fn delete_owned(
        conn: &mut SqliteConnection,
        deck_id: i32,
        user_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        if !Self::owned_by_user(conn, deck_id, user_id)? {
            return Ok(false);
        }

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(flashcards::table.filter(flashcards::deck_id.eq(deck_id)))
                .execute(conn)?;
            diesel::delete(decks::table.filter(decks::deck_id.eq(deck_id))).execute(conn)
        })?;

        Ok(true)
    }
}
