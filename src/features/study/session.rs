//! Server-side study session state machine.
//!
//! The session is the single source of truth for a study run: the card
//! order, the cursor, which side of the card faces up, and which cards
//! have been studied. Every mutation goes through a method here, so the
//! invariants (cursor in bounds, studied set only grows, flips ignored
//! mid-transition) hold no matter what sequence of requests arrives.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::models::{Flashcard, StudyCardView, StudyStateView};

/// How long a flip stays locked, matching the card's CSS transition.
/// Flips arriving inside this window are dropped, not queued.
pub const FLIP_LOCK_MS: i64 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyCard {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty_level: String,
}

impl From<Flashcard> for StudyCard {
    fn from(card: Flashcard) -> Self {
        StudyCard {
            id: card.flashcard_id,
            question: card.question,
            answer: card.answer,
            difficulty_level: card.difficulty_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    deck_id: i32,
    cards: Vec<StudyCard>,
    /// Snapshot of the deck order at session start, restored when
    /// shuffle is toggled off or the session is reset.
    original_order: Vec<StudyCard>,
    cursor: usize,
    flipped: bool,
    studied: HashSet<i32>,
    shuffled: bool,
    flip_locked_until: Option<DateTime<Utc>>,
}

impl StudySession {
    pub fn new(deck_id: i32, cards: Vec<StudyCard>) -> Self {
        StudySession {
            deck_id,
            original_order: cards.clone(),
            cards,
            cursor: 0,
            flipped: false,
            studied: HashSet::new(),
            shuffled: false,
            flip_locked_until: None,
        }
    }

    pub fn deck_id(&self) -> i32 {
        self.deck_id
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn studied(&self) -> &HashSet<i32> {
        &self.studied
    }

    pub fn current_card(&self) -> Option<&StudyCard> {
        self.cards.get(self.cursor)
    }

    /// Flip the current card. Returns `false` when the flip was dropped,
    /// either because the deck is empty or a previous flip is still
    /// inside its lock window. Revealing the answer marks the card as
    /// studied; the studied set never shrinks while navigating.
    pub fn flip(&mut self, now: DateTime<Utc>) -> bool {
        if self.cards.is_empty() {
            return false;
        }
        if let Some(until) = self.flip_locked_until {
            if now < until {
                return false;
            }
        }

        self.flipped = !self.flipped;
        if self.flipped {
            if let Some(card) = self.cards.get(self.cursor) {
                self.studied.insert(card.id);
            }
        }
        self.flip_locked_until = Some(now + Duration::milliseconds(FLIP_LOCK_MS));
        true
    }

    /// Advance to the next card. At the last card this is a no-op and the
    /// flip state is left alone.
    pub fn next(&mut self) {
        if self.cursor + 1 < self.cards.len() {
            self.cursor += 1;
            self.clear_flip();
        }
    }

    /// Move back one card. At the first card this is a no-op.
    pub fn previous(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.clear_flip();
        }
    }

    /// Jump straight to `index`. Out-of-range jumps are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.cards.len() {
            self.cursor = index;
            self.clear_flip();
        }
    }

    /// Toggle shuffle. Turning it on permutes the working order with a
    /// Fisher-Yates pass; turning it off restores the original order.
    /// Either way the cursor returns to the front and the studied set is
    /// untouched.
    pub fn toggle_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.shuffled {
            self.cards = self.original_order.clone();
            self.shuffled = false;
        } else {
            self.cards.shuffle(rng);
            self.shuffled = true;
        }
        self.cursor = 0;
        self.clear_flip();
    }

    /// Back to a pristine session: original order, front of the deck,
    /// nothing studied.
    pub fn reset(&mut self) {
        self.cards = self.original_order.clone();
        self.cursor = 0;
        self.studied.clear();
        self.shuffled = false;
        self.clear_flip();
    }

    fn clear_flip(&mut self) {
        self.flipped = false;
        self.flip_locked_until = None;
    }

    /// Position through the deck as a fraction, `0.0` for an empty deck.
    pub fn position_fraction(&self) -> f32 {
        if self.cards.is_empty() {
            return 0.0;
        }
        (self.cursor + 1) as f32 / self.cards.len() as f32
    }

    /// Share of cards studied, `0.0` for an empty deck.
    pub fn studied_fraction(&self) -> f32 {
        if self.cards.is_empty() {
            return 0.0;
        }
        self.studied.len() as f32 / self.cards.len() as f32
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.studied.len() >= self.cards.len()
    }

    pub fn view(&self) -> StudyStateView {
        let mut studied: Vec<i32> = self.studied.iter().copied().collect();
        studied.sort_unstable();

        StudyStateView {
            deck_id: self.deck_id,
            total: self.cards.len(),
            cursor: self.cursor,
            flipped: self.flipped,
            shuffled: self.shuffled,
            complete: self.is_complete(),
            studied_count: self.studied.len(),
            studied,
            position: self.position_fraction(),
            studied_fraction: self.studied_fraction(),
            cards: self
                .cards
                .iter()
                .map(|card| StudyCardView {
                    id: card.id,
                    question: card.question.clone(),
                    answer: card.answer.clone(),
                    difficulty_level: card.difficulty_level.clone(),
                })
                .collect(),
        }
    }
}
