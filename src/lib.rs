//! # Study Buddy
//!
//! Web application that turns pasted study notes into flashcard decks:
//! - Account registration and session-cookie login
//! - Flashcard generation from raw notes (inference API with local fallback)
//! - Deck management (create, list, delete) backed by SQLite
//! - Server-side study sessions (flip, navigate, shuffle, reset)

pub mod config;
pub mod data;
pub mod db;
pub mod features;
pub mod handlers;
pub mod schema;
pub mod utils;

use diesel::{
    r2d2::{ConnectionManager, Pool},
    SqliteConnection,
};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
