pub mod session;

pub use session::{StudyCard, StudySession, FLIP_LOCK_MS};
