// ============================================================
// Layer 4 - Flashcard Post-Processor
// ============================================================
// Turns the raw candidates collected from every chunk into the
// final card list.
//
// Per candidate, in order:
//   1. Trim both fields and strip ONE pair of wrapping double
//      quotes ("\"abc\"" → "abc", but "\"abc" stays as is)
//   2. Check minimum lengths (question ≥ 5 chars, answer ≥ 2).
//      Length is the only test, so the parser placeholder
//      "(No answer provided)" passes and the card is kept.
//   3. Too-short card with a usable question and a missing
//      answer (empty or placeholder) → look for the closest
//      sentence in the original text and adopt it as the
//      answer. No close sentence → the card is dropped.
//   4. Any other invalid card is dropped.
//   5. Assign the final difficulty (fixed level overwrites,
//      Mixed keeps the card's own value)
//
// Afterwards duplicates are removed: two cards with the same
// question AND answer (ignoring case) collapse into the first.
//
// Reference: Rust Book §8 (HashSet), §13 (Iterators)

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::similarity::best_match;
use crate::domain::flashcard::{DifficultyLevel, Flashcard};

/// Sentence-ending punctuation followed by whitespace
static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+").expect("valid sentence boundary pattern")
});

pub const DEFAULT_MIN_QUESTION_CHARS: usize = 5;
pub const DEFAULT_MIN_ANSWER_CHARS: usize   = 2;
pub const DEFAULT_REPAIR_CUTOFF: f64        = 0.6;

#[derive(Debug, Clone)]
pub struct PostProcessor {
    min_question_chars: usize,
    min_answer_chars:   usize,
    /// Lowest similarity a source sentence needs to be adopted
    /// as a missing answer
    repair_cutoff:      f64,
}

impl PostProcessor {
    pub fn new(min_question_chars: usize, min_answer_chars: usize, repair_cutoff: f64) -> Self {
        Self { min_question_chars, min_answer_chars, repair_cutoff }
    }

    /// Validate, repair, tag and deduplicate `candidates`.
    ///
    /// `source` is the caller's original text (before cleaning);
    /// without it, cards with missing answers cannot be repaired.
    pub fn process(
        &self,
        candidates: Vec<Flashcard>,
        level:      DifficultyLevel,
        source:     Option<&str>,
    ) -> Vec<Flashcard> {
        let sentences = source.map(split_sentences).unwrap_or_default();
        let total     = candidates.len();

        let finished: Vec<Flashcard> = candidates
            .into_iter()
            .filter_map(|card| self.finish(card, level, &sentences))
            .collect();

        let unique = dedup(finished);
        tracing::debug!("Post-processing kept {} of {} candidates", unique.len(), total);
        unique
    }

    /// Clean one card; None means it must be discarded
    fn finish(
        &self,
        mut card:  Flashcard,
        level:     DifficultyLevel,
        sentences: &[String],
    ) -> Option<Flashcard> {
        card.question = strip_wrapping_quotes(&card.question);
        card.answer   = strip_wrapping_quotes(&card.answer);

        if !self.is_valid(&card) {
            let repairable = self.question_ok(&card) && card.answer_missing() && !sentences.is_empty();
            if !repairable {
                tracing::debug!("Dropping invalid card: {:?}", card.question);
                return None;
            }

            let Some(sentence) = best_match(&card.question, sentences, self.repair_cutoff) else {
                tracing::debug!("No source sentence close to {:?}; dropping", card.question);
                return None;
            };
            tracing::debug!("Repaired answer for {:?}", card.question);
            card.answer = sentence.to_string();

            if !self.is_valid(&card) {
                return None;
            }
        }

        card.difficulty = level.resolve(card.difficulty);
        Some(card)
    }

    fn question_ok(&self, card: &Flashcard) -> bool {
        card.question.chars().count() >= self.min_question_chars
    }

    fn is_valid(&self, card: &Flashcard) -> bool {
        self.question_ok(card) && card.answer.chars().count() >= self.min_answer_chars
    }
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_QUESTION_CHARS, DEFAULT_MIN_ANSWER_CHARS, DEFAULT_REPAIR_CUTOFF)
    }
}

/// Trim, drop one pair of surrounding double quotes, trim again
fn strip_wrapping_quotes(field: &str) -> String {
    let trimmed = field.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split on sentence-ending punctuation followed by whitespace.
/// Inner whitespace runs are collapsed so an adopted sentence
/// reads like the rest of the cards.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start     = 0;

    let mut push = |piece: &str| {
        let normalised = piece.split_whitespace().collect::<Vec<_>>().join(" ");
        if !normalised.is_empty() {
            sentences.push(normalised);
        }
    };

    for boundary in SENTENCE_END_RE.find_iter(text) {
        // Punctuation is a single ASCII byte, keep it on the sentence
        let end = boundary.start() + 1;
        push(&text[start..end]);
        start = boundary.end();
    }
    push(&text[start..]);

    sentences
}

/// Keep the first card of every case-insensitive (question, answer) pair
fn dedup(cards: Vec<Flashcard>) -> Vec<Flashcard> {
    let mut seen = HashSet::new();
    cards
        .into_iter()
        .filter(|card| seen.insert(card.dedup_key()))
        .collect()
}
