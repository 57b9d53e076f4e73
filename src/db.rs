//! Database initialization.
//!
//! Creates tables and indexes on startup. Re-running against an
//! existing database is a no-op.

use diesel::connection::SimpleConnection;

use crate::DbPool;

const SCHEMA_DDL: &str = "
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS decks (
    deck_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(user_id),
    title TEXT NOT NULL,
    description TEXT,
    original_notes TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS flashcards (
    flashcard_id INTEGER PRIMARY KEY AUTOINCREMENT,
    deck_id INTEGER NOT NULL REFERENCES decks(deck_id),
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    difficulty_level TEXT NOT NULL DEFAULT 'medium'
);

CREATE INDEX IF NOT EXISTS idx_decks_user_id ON decks(user_id);
CREATE INDEX IF NOT EXISTS idx_flashcards_deck_id ON flashcards(deck_id);
";

/// Create the tables if they do not exist yet. Safe to call on every startup.
pub fn init_database(pool: &DbPool) -> anyhow::Result<()> {
    let mut conn = pool.get()?;
    conn.batch_execute(SCHEMA_DDL)?;
    log::info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::r2d2::{ConnectionManager, Pool};
    use diesel::SqliteConnection;

    fn file_pool(path: &std::path::Path) -> DbPool {
        let manager = ConnectionManager::<SqliteConnection>::new(path.to_str().unwrap());
        Pool::builder().build(manager).unwrap()
    }

    #[test]
    fn creates_schema_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir.path().join("test.db"));

        init_database(&pool).unwrap();
        // Second run must not fail on existing tables.
        init_database(&pool).unwrap();

        use diesel::prelude::*;
        let mut conn = pool.get().unwrap();
        let count: i64 = crate::schema::users::table.count().get_result(&mut conn).unwrap();
        assert_eq!(count, 0);
    }
}
