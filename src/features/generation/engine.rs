//! Flashcard generation engine.
//!
//! Strategies are tried in order of quality: hosted text generation,
//! hosted question generation, local concept extraction, and finally a
//! fallback builder that always produces a full set. Deck creation
//! succeeds with or without a reachable inference API.

use std::time::Duration;

use serde_json::Value;

use crate::config::AppConfig;
use crate::data::models::{Difficulty, GeneratedCard};
use crate::features::generation::client::{GenerationParams, InferenceClient};
use crate::features::generation::text::TextProcessor;

pub const TEXT_GENERATION_MODEL: &str = "microsoft/DialoGPT-medium";
pub const QUESTION_GENERATION_MODEL: &str = "valhalla/t5-small-qg-hl";

const TEXT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);
const QUESTION_GENERATION_TIMEOUT: Duration = Duration::from_secs(15);

// Verbs that signal a card asks for more than recall.
const COMPLEX_WORDS: &[&str] = &["analyze", "evaluate", "synthesize", "compare", "contrast"];

pub struct FlashcardGenerator {
    client: Option<InferenceClient>,
    cards_per_deck: usize,
}

impl FlashcardGenerator {
    pub fn new(config: &AppConfig) -> Self {
        let client = config
            .inference_api_key
            .as_deref()
            .map(|key| InferenceClient::new(&config.inference_api_url, key));
        FlashcardGenerator {
            client,
            cards_per_deck: config.cards_per_deck,
        }
    }

    /// Generator that only uses the local strategies.
    pub fn offline(cards_per_deck: usize) -> Self {
        FlashcardGenerator {
            client: None,
            cards_per_deck,
        }
    }

    pub fn cards_per_deck(&self) -> usize {
        self.cards_per_deck
    }

    /// Generate cards from preprocessed notes. Never fails: when a remote
    /// strategy errors or yields too few cards, the next one runs.
    pub async fn generate(&self, notes: &str) -> Vec<GeneratedCard> {
        let count = self.cards_per_deck;

        if let Some(client) = &self.client {
            match self.generate_with_text_model(client, notes, count).await {
                Ok(pairs) if pairs.len() >= count => return Self::finalize(pairs, count),
                Ok(pairs) => {
                    log::debug!("Text generation produced only {} cards", pairs.len())
                }
                Err(e) => log::warn!("Text generation strategy failed: {:#}", e),
            }

            match self.generate_with_question_model(client, notes, count).await {
                Ok(pairs) if pairs.len() >= count => return Self::finalize(pairs, count),
                Ok(pairs) => {
                    log::debug!("Question generation produced only {} cards", pairs.len())
                }
                Err(e) => log::warn!("Question generation strategy failed: {:#}", e),
            }
        } else {
            log::info!("No inference API key configured, generating locally");
        }

        let pairs = Self::generate_from_concepts(notes, count);
        if pairs.len() >= count {
            return Self::finalize(pairs, count);
        }

        Self::finalize(Self::fallback_pairs(notes, count), count)
    }

    /// Ask the text model for a whole card set in one JSON response.
    async fn generate_with_text_model(
        &self,
        client: &InferenceClient,
        notes: &str,
        count: usize,
    ) -> anyhow::Result<Vec<(String, String)>> {
        let context: String = notes.chars().take(1000).collect();
        let prompt = format!(
            "Generate {} study flashcards in JSON format with fields 'question' and 'answer'. \
             Focus only on academic content. Context:\n{}",
            count, context
        );
        let params = GenerationParams {
            max_new_tokens: Some(400),
            temperature: 0.7,
            do_sample: Some(true),
            return_full_text: Some(false),
            ..Default::default()
        };

        let text = client
            .text_generation(TEXT_GENERATION_MODEL, &prompt, &params, TEXT_GENERATION_TIMEOUT)
            .await?;
        Ok(Self::parse_generated_pairs(&text))
    }

    /// Ask the question-generation model for one question per sentence,
    /// with the sentence itself as the answer.
    async fn generate_with_question_model(
        &self,
        client: &InferenceClient,
        notes: &str,
        count: usize,
    ) -> anyhow::Result<Vec<(String, String)>> {
        let params = GenerationParams {
            max_length: Some(100),
            temperature: 0.8,
            ..Default::default()
        };

        let mut pairs = Vec::new();
        for sentence in TextProcessor::split_sentences(notes).into_iter().take(count) {
            if sentence.len() < 20 {
                continue;
            }

            let prompt = format!("generate question: {}", sentence);
            let question = client
                .text_generation(
                    QUESTION_GENERATION_MODEL,
                    &prompt,
                    &params,
                    QUESTION_GENERATION_TIMEOUT,
                )
                .await?;

            let question = question.trim();
            if question.len() > 10 {
                pairs.push((question.to_string(), sentence));
            }
        }
        Ok(pairs)
    }

    /// Local strategy: question per extracted concept, answered by the
    /// concept's definition when one exists, otherwise by the first
    /// sentence mentioning it.
    fn generate_from_concepts(notes: &str, count: usize) -> Vec<(String, String)> {
        let concepts = TextProcessor::extract_key_concepts(notes);
        let sentences = TextProcessor::split_sentences(notes);
        let definitions = TextProcessor::extract_definitions(notes);

        let mut pairs: Vec<(String, String)> = Vec::new();
        for concept in concepts.iter().take(count) {
            let lower = concept.to_lowercase();
            let answer = definitions
                .iter()
                .find(|(c, _)| c.to_lowercase() == lower)
                .map(|(_, d)| d.clone())
                .or_else(|| {
                    sentences
                        .iter()
                        .find(|s| s.to_lowercase().contains(&lower))
                        .cloned()
                });

            if let Some(answer) = answer {
                let question = Self::concept_question(concept, pairs.len());
                pairs.push((question, answer));
            }
        }
        pairs
    }

    /// Last resort: concept cards, fill-in-the-blank cards, then padding
    /// up to the requested count.
    fn fallback_pairs(notes: &str, count: usize) -> Vec<(String, String)> {
        let sentences = TextProcessor::split_sentences(notes);
        let concepts = TextProcessor::extract_key_concepts(notes);

        let mut pairs: Vec<(String, String)> = Vec::new();

        for concept in concepts.iter().take(count / 2) {
            let lower = concept.to_lowercase();
            let answer = sentences
                .iter()
                .find(|s| s.to_lowercase().contains(&lower))
                .cloned()
                .unwrap_or_else(|| format!("This relates to {}", concept));
            pairs.push((format!("What is {}?", concept), answer));
        }

        let remaining = count.saturating_sub(pairs.len());
        for sentence in sentences.iter().take(remaining) {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            if words.len() <= 5 {
                continue;
            }
            if let Some(word) = words
                .iter()
                .find(|w| w.len() > 4 && w.chars().all(char::is_alphabetic))
            {
                let cloze = sentence.replacen(*word, "______", 1);
                pairs.push((format!("Fill in the blank: {}", cloze), (*word).to_string()));
            }
        }

        while pairs.len() < count {
            pairs.push((
                format!("Review question {}", pairs.len() + 1),
                "Please review your study notes for this concept.".to_string(),
            ));
        }

        pairs.truncate(count);
        pairs
    }

    fn concept_question(concept: &str, index: usize) -> String {
        match index % 5 {
            0 => format!("What is {}?", concept),
            1 => format!("Define {}.", concept),
            2 => format!("Explain the concept of {}.", concept),
            3 => format!("What do you know about {}?", concept),
            _ => format!("Describe {}.", concept),
        }
    }

    /// Parse a model response that should be a JSON array of
    /// question/answer objects. Anything malformed yields no cards.
    fn parse_generated_pairs(text: &str) -> Vec<(String, String)> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => items
                .iter()
                .filter_map(|item| {
                    let question = item.get("question")?.as_str()?;
                    let answer = item.get("answer")?.as_str()?;
                    Some((question.to_string(), answer.to_string()))
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn assess_difficulty(question: &str, answer: &str) -> Difficulty {
        let question_words = question.split_whitespace().count();
        let answer_words = answer.split_whitespace().count();

        let question_lower = question.to_lowercase();
        let has_complex_words = COMPLEX_WORDS.iter().any(|w| question_lower.contains(w));

        if has_complex_words || answer_words > 20 {
            Difficulty::Hard
        } else if question_words > 10 || answer_words > 10 {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }

    /// Drop cards that are too short to be useful and exact duplicate
    /// questions, keeping the first occurrence.
    pub fn validate_quality(cards: Vec<GeneratedCard>) -> Vec<GeneratedCard> {
        let mut validated: Vec<GeneratedCard> = Vec::new();

        for card in cards {
            let question = card.question.trim();
            let answer = card.answer.trim();

            if question.len() < 5 || answer.len() < 3 {
                continue;
            }

            let question_lower = question.to_lowercase();
            let duplicate = validated
                .iter()
                .any(|existing| existing.question.to_lowercase() == question_lower);
            if !duplicate {
                validated.push(GeneratedCard {
                    question: question.to_string(),
                    answer: answer.to_string(),
                    difficulty: card.difficulty,
                });
            }
        }
        validated
    }

    fn finalize(pairs: Vec<(String, String)>, count: usize) -> Vec<GeneratedCard> {
        pairs
            .into_iter()
            .take(count)
            .map(|(question, answer)| {
                let difficulty = Self::assess_difficulty(&question, &answer);
                GeneratedCard {
                    question,
                    answer,
                    difficulty,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_NOTES: &str = "Photosynthesis is the process by which plants convert sunlight into energy. \
        Chlorophyll is the green pigment that captures light energy. \
        The process occurs in the chloroplasts of plant cells. \
        Carbon dioxide and water are the raw materials for photosynthesis. \
        Oxygen is released as a byproduct of this process.";

    #[test]
    fn fallback_always_fills_the_requested_count() {
        let pairs = FlashcardGenerator::fallback_pairs("zzz.", 5);
        assert_eq!(pairs.len(), 5);
        assert!(pairs.iter().all(|(q, a)| !q.is_empty() && !a.is_empty()));
        assert_eq!(pairs[0].0, "Review question 1");
        assert_eq!(pairs[4].0, "Review question 5");
    }

    #[test]
    fn fallback_builds_concept_and_cloze_cards() {
        let pairs = FlashcardGenerator::fallback_pairs(SAMPLE_NOTES, 5);
        assert_eq!(pairs.len(), 5);
        assert!(pairs.iter().any(|(q, _)| q.starts_with("What is ")));
        assert!(pairs
            .iter()
            .any(|(q, _)| q.starts_with("Fill in the blank:") && q.contains("______")));
    }

    #[test]
    fn fallback_cloze_answer_is_the_blanked_word() {
        let pairs = FlashcardGenerator::fallback_pairs(SAMPLE_NOTES, 5);
        let (question, answer) = pairs
            .iter()
            .find(|(q, _)| q.starts_with("Fill in the blank:"))
            .expect("expected a cloze card");
        assert!(!question.contains(answer));
        assert!(answer.len() > 4);
    }

    #[test]
    fn concept_strategy_rotates_question_templates() {
        let notes = "Mercury is the closest planet to the sun. \
            Venus is the hottest planet in the system. \
            Earth is the only planet known to have life. \
            Mars is the fourth planet from the sun. \
            Jupiter is the largest planet of them all.";
        let pairs = FlashcardGenerator::generate_from_concepts(notes, 5);
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[0].0, "What is Mercury?");
        assert_eq!(pairs[1].0, "Define Venus.");
        assert_eq!(pairs[2].0, "Explain the concept of Earth.");
        assert_eq!(pairs[3].0, "What do you know about Mars?");
        assert_eq!(pairs[4].0, "Describe Jupiter.");
    }

    #[test]
    fn concept_strategy_prefers_definitions_as_answers() {
        let notes = "Mercury is the closest planet to the sun.";
        let pairs = FlashcardGenerator::generate_from_concepts(notes, 5);
        assert_eq!(pairs[0].1, "the closest planet to the sun");
    }

    #[tokio::test]
    async fn offline_generation_returns_exactly_the_configured_count() {
        let generator = FlashcardGenerator::offline(5);
        let cards = generator.generate(SAMPLE_NOTES).await;
        assert_eq!(cards.len(), 5);
        assert!(cards.iter().all(|c| !c.question.is_empty()));
    }

    #[tokio::test]
    async fn offline_generation_handles_empty_notes() {
        let generator = FlashcardGenerator::offline(5);
        let cards = generator.generate("").await;
        assert_eq!(cards.len(), 5);
        assert!(cards[0].question.starts_with("Review question"));
    }

    #[test]
    fn difficulty_easy_for_short_cards() {
        let difficulty =
            FlashcardGenerator::assess_difficulty("What is photosynthesis?", "A process in plants");
        assert_eq!(difficulty, Difficulty::Easy);
    }

    #[test]
    fn difficulty_hard_for_complex_questions() {
        let difficulty = FlashcardGenerator::assess_difficulty(
            "Analyze the biochemical pathways involved in photosynthesis",
            "Photosynthesis involves light dependent and independent reactions",
        );
        assert_eq!(difficulty, Difficulty::Hard);
    }

    #[test]
    fn difficulty_hard_for_long_answers() {
        let answer = "word ".repeat(25);
        let difficulty = FlashcardGenerator::assess_difficulty("What is this?", &answer);
        assert_eq!(difficulty, Difficulty::Hard);
    }

    #[test]
    fn difficulty_medium_for_long_questions() {
        let difficulty = FlashcardGenerator::assess_difficulty(
            "What happens to the water molecules during the light dependent reactions stage?",
            "They are split",
        );
        assert_eq!(difficulty, Difficulty::Medium);
    }

    #[test]
    fn quality_filter_drops_short_cards() {
        let cards = vec![
            card("Q?", "answer text"),
            card("What is chlorophyll?", "ab"),
            card("What is photosynthesis?", "A conversion process"),
        ];
        let validated = FlashcardGenerator::validate_quality(cards);
        assert_eq!(validated.len(), 1);
        assert_eq!(validated[0].question, "What is photosynthesis?");
    }

    #[test]
    fn quality_filter_drops_duplicate_questions_case_insensitively() {
        let cards = vec![
            card("What is photosynthesis?", "First answer"),
            card("WHAT IS PHOTOSYNTHESIS?", "Second answer"),
            card("Review question 1", "Please review your study notes for this concept."),
            card("Review question 2", "Please review your study notes for this concept."),
        ];
        let validated = FlashcardGenerator::validate_quality(cards);
        assert_eq!(validated.len(), 3);
        assert_eq!(validated[0].answer, "First answer");
    }

    #[test]
    fn parses_model_output_into_pairs() {
        let text = r#"[
            {"question": "What is DNA?", "answer": "Genetic material"},
            {"question": "What is RNA?", "answer": "Messenger molecule"}
        ]"#;
        let pairs = FlashcardGenerator::parse_generated_pairs(text);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "What is DNA?");
    }

    #[test]
    fn malformed_model_output_yields_no_pairs() {
        assert!(FlashcardGenerator::parse_generated_pairs("no json here").is_empty());
        assert!(FlashcardGenerator::parse_generated_pairs("{\"question\": \"q\"}").is_empty());
    }

    #[test]
    fn items_missing_fields_are_skipped() {
        let text = r#"[{"question": "Only a question"}, {"question": "Q", "answer": "A"}]"#;
        let pairs = FlashcardGenerator::parse_generated_pairs(text);
        assert_eq!(pairs.len(), 1);
    }

    fn card(question: &str, answer: &str) -> GeneratedCard {
        GeneratedCard {
            question: question.into(),
            answer: answer.into(),
            difficulty: Difficulty::Medium,
        }
    }
}
