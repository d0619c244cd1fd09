// ============================================================
// Layer 3 - Flashcard Domain Type
// ============================================================
// The only entity the system produces: a question, its answer
// and a difficulty tag.
//
// Lifecycle within one run:
//   1. The output parser creates raw candidates (answer may be
//      the placeholder, difficulty always Medium)
//   2. The post-processor trims, strips quotes, repairs missing
//      answers and assigns the final difficulty
//   3. Survivors are returned to the caller, who exports them
//
// Nothing here is persisted; serde derives exist for export.
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Answer value the parser uses when a section had a question
/// but no recognisable answer. It is long enough to pass
/// validation, so such cards reach the output unchanged.
pub const NO_ANSWER_PLACEHOLDER: &str = "(No answer provided)";

// ─── Difficulty ───────────────────────────────────────────────────────────────
/// Difficulty tag carried by every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy   => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard   => "Hard",
        };
        f.write_str(s)
    }
}

// ─── DifficultyLevel ──────────────────────────────────────────────────────────
/// The difficulty a caller asks for.
///
/// A fixed level overwrites every card's difficulty; `Mixed`
/// keeps whatever each card arrived with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
    #[default]
    Mixed,
}

impl DifficultyLevel {
    /// Final difficulty for a card that currently carries `current`
    pub fn resolve(self, current: Difficulty) -> Difficulty {
        match self {
            DifficultyLevel::Easy   => Difficulty::Easy,
            DifficultyLevel::Medium => Difficulty::Medium,
            DifficultyLevel::Hard   => Difficulty::Hard,
            DifficultyLevel::Mixed  => current,
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DifficultyLevel::Easy   => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard   => "Hard",
            DifficultyLevel::Mixed  => "Mixed",
        };
        f.write_str(s)
    }
}

impl FromStr for DifficultyLevel {
    type Err = String;

    /// Case-insensitive: "easy", "Easy" and "EASY" all parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy"   => Ok(DifficultyLevel::Easy),
            "medium" => Ok(DifficultyLevel::Medium),
            "hard"   => Ok(DifficultyLevel::Hard),
            "mixed"  => Ok(DifficultyLevel::Mixed),
            other    => Err(format!(
                "unknown difficulty '{other}' (expected Easy, Medium, Hard or Mixed)"
            )),
        }
    }
}

// ─── Flashcard ────────────────────────────────────────────────────────────────
/// One study item. Field order is the column order used by
/// the tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
}

impl Flashcard {
    /// Create a card with an explicit difficulty
    pub fn new(
        question:   impl Into<String>,
        answer:     impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            question: question.into(),
            answer:   answer.into(),
            difficulty,
        }
    }

    /// A raw parser candidate: difficulty starts at Medium and a
    /// missing answer becomes the placeholder.
    pub fn candidate(question: impl Into<String>, answer: Option<String>) -> Self {
        Self::new(
            question,
            answer.unwrap_or_else(|| NO_ANSWER_PLACEHOLDER.to_string()),
            Difficulty::Medium,
        )
    }

    /// True when the answer is empty or still the placeholder
    pub fn answer_missing(&self) -> bool {
        let answer = self.answer.trim();
        answer.is_empty() || answer == NO_ANSWER_PLACEHOLDER
    }

    /// Case-insensitive identity used for deduplication
    pub fn dedup_key(&self) -> (String, String) {
        (self.question.to_lowercase(), self.answer.to_lowercase())
    }
}
