use serde::{Deserialize, Serialize};

/// Request payload for starting a study session.
#[derive(Debug, Deserialize)]
pub struct StartStudyRequest {
    pub deck_id: i32,
}

/// Request payload for jumping to a specific card.
#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub index: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudyCardView {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty_level: String,
}

/// Full snapshot of a study session, returned by every study endpoint.
#[derive(Debug, Serialize)]
pub struct StudyStateView {
    pub deck_id: i32,
    pub total: usize,
    pub cursor: usize,
    pub flipped: bool,
    pub shuffled: bool,
    pub complete: bool,
    /// Ids of every card whose answer has been revealed at least once.
    pub studied: Vec<i32>,
    pub studied_count: usize,
    /// Position through the deck as a fraction in `[0, 1]`.
    pub position: f32,
    /// Share of cards studied as a fraction in `[0, 1]`.
    pub studied_fraction: f32,
    pub cards: Vec<StudyCardView>,
}
