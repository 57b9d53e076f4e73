//! Note preprocessing for flashcard generation.
//!
//! Raw pasted notes are noisy. Before any generation strategy runs, the
//! notes are reduced to their highest-scoring sentences so prompts stay
//! short and the local strategies work from the most teachable material.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SENTENCE_RE: Regex = Regex::new(r"[^.!?]+[.!?]*").unwrap();
    static ref CAPITALIZED_RE: Regex = Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap();
    static ref CAPITALIZED_WORD_RE: Regex = Regex::new(r"\b[A-Z][a-z]+\b").unwrap();
    static ref QUOTED_RE: Regex = Regex::new("\"([^\"]+)\"").unwrap();
    static ref PARENTHESES_RE: Regex = Regex::new(r"\(([^)]+)\)").unwrap();
    static ref NUMBER_RE: Regex = Regex::new(r"\b\d+\b").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref DEFINITION_RES: Vec<Regex> = vec![
        Regex::new(r"(?i)^(.+?)\s+is defined as\s+(.+?)\.?$").unwrap(),
        Regex::new(r"(?i)^(.+?)\s+refers to\s+(.+?)\.?$").unwrap(),
        Regex::new(r"(?i)^(.+?)\s+means\s+(.+?)\.?$").unwrap(),
        Regex::new(r"(?i)^(.+?)\s+is\s+(.+?)\.?$").unwrap(),
    ];
}

// Keywords that mark a sentence as likely exam material.
const ACADEMIC_KEYWORDS: &[&str] = &[
    // definitions
    "define", "definition", "meaning", "refers to", "is defined as",
    // processes
    "process", "procedure", "method", "steps", "stages",
    // cause and effect
    "because", "therefore", "as a result", "leads to", "causes",
    // comparisons
    "compared to", "unlike", "similar to", "different from",
    // importance markers
    "important", "significant", "crucial", "essential", "key",
];

/// How similar two extracted concepts must be before the second one is
/// dropped as a duplicate.
const CONCEPT_DUPLICATE_THRESHOLD: f64 = 0.92;

const MAX_KEY_SENTENCES: usize = 15;

pub struct TextProcessor;

impl TextProcessor {
    /// Reduce raw notes to their most important sentences, joined and
    /// whitespace-normalized.
    pub fn preprocess_notes(notes: &str) -> String {
        let key_sentences = Self::extract_key_sentences(notes, MAX_KEY_SENTENCES);
        let joined = key_sentences.join(" ");
        WHITESPACE_RE.replace_all(&joined, " ").trim().to_string()
    }

    pub fn split_sentences(text: &str) -> Vec<String> {
        SENTENCE_RE
            .find_iter(text)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// The `max` highest-scoring sentences, best first.
    pub fn extract_key_sentences(text: &str, max: usize) -> Vec<String> {
        let mut scored: Vec<(String, f32)> = Self::split_sentences(text)
            .into_iter()
            .map(|s| {
                let score = Self::score_sentence(&s);
                (s, score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(max).map(|(s, _)| s).collect()
    }

    /// Score a sentence by how much flashcard material it likely holds.
    pub fn score_sentence(sentence: &str) -> f32 {
        let mut score = 0.0;

        // Medium-length sentences make the best cards.
        let word_count = sentence.split_whitespace().count();
        if (5..=25).contains(&word_count) {
            score += 1.0;
        } else if word_count < 5 {
            score -= 0.5;
        }

        let lower = sentence.to_lowercase();
        for keyword in ACADEMIC_KEYWORDS {
            if lower.contains(keyword) {
                score += 0.5;
            }
        }

        // Proper nouns and named concepts.
        score += CAPITALIZED_WORD_RE.find_iter(sentence).count() as f32 * 0.2;

        // Numbers and dates are often the testable fact.
        score += NUMBER_RE.find_iter(sentence).count() as f32 * 0.3;

        if sentence.trim_end().ends_with('?') {
            score += 0.5;
        }

        score
    }

    /// Candidate concepts: capitalized terms, quoted phrases and
    /// parenthesized asides, deduplicated and length-filtered.
    pub fn extract_key_concepts(text: &str) -> Vec<String> {
        let mut concepts: Vec<String> = Vec::new();

        for m in CAPITALIZED_RE.find_iter(text) {
            concepts.push(m.as_str().to_string());
        }
        for c in QUOTED_RE.captures_iter(text) {
            concepts.push(c[1].to_string());
        }
        for c in PARENTHESES_RE.captures_iter(text) {
            concepts.push(c[1].to_string());
        }

        let mut unique: Vec<String> = Vec::new();
        for concept in concepts {
            if !(3..50).contains(&concept.len()) {
                continue;
            }
            let lower = concept.to_lowercase();
            let duplicate = unique.iter().any(|existing| {
                strsim::jaro_winkler(&existing.to_lowercase(), &lower)
                    > CONCEPT_DUPLICATE_THRESHOLD
            });
            if !duplicate {
                unique.push(concept);
            }
        }
        unique
    }

    /// Concept/definition pairs from "X is ..." style sentences. The
    /// concept must be a short phrase and the definition long enough to
    /// stand alone as an answer.
    pub fn extract_definitions(text: &str) -> Vec<(String, String)> {
        let mut definitions = Vec::new();

        for sentence in Self::split_sentences(text) {
            for pattern in DEFINITION_RES.iter() {
                if let Some(caps) = pattern.captures(&sentence) {
                    let concept = caps[1].trim().to_string();
                    let definition = caps[2].trim().to_string();
                    let concept_words = concept.split_whitespace().count();
                    if (1..=5).contains(&concept_words) && definition.len() > 10 {
                        definitions.push((concept, definition));
                    }
                    break;
                }
            }
        }
        definitions
    }
}
