// ============================================================
// Layer 5 - Output Parser
// ============================================================
// Extracts question/answer candidates from whatever the model
// wrote back.
//
// The model is asked for "Q: ... / A: ... / ---" blocks but is
// free to ignore that, so every rule here is a fallback for a
// way real completions go wrong:
//
//   1. Sections: split on the "---" delimiter; with no
//      delimiter at all, split on blank lines instead
//   2. Labels win: a line starting "Q:" sets the question, "A:"
//      sets the answer. Order inside a section doesn't matter
//      and the last label of each kind wins. Labels only count
//      at the start of a line.
//   3. No Q: label → if the first unlabelled line ends with '?'
//      it is the question and the next line the answer;
//      otherwise the first line is the question on its own
//   4. Still no answer → placeholder
//   5. Still no question → the section is skipped
//
// Example:
//   "Q: What is X?\nA: X is Y.\n---\nWhat is Z?"
//   → [ {What is X?, X is Y.}, {What is Z?, (No answer provided)} ]

use crate::domain::flashcard::Flashcard;
use crate::ml::prompt::CARD_DELIMITER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Question,
    Answer,
}

#[derive(Debug, Clone, Default)]
pub struct OutputParser;

impl OutputParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one completion into candidate cards, in order
    pub fn parse(&self, completion: &str) -> Vec<Flashcard> {
        split_sections(completion)
            .iter()
            .filter_map(|section| parse_section(section))
            .collect()
    }
}

/// Delimiter sections, or blank-line paragraphs when the model
/// never wrote a delimiter
fn split_sections(completion: &str) -> Vec<String> {
    if completion.contains(CARD_DELIMITER) {
        return completion
            .split(CARD_DELIMITER)
            .map(str::to_string)
            .collect();
    }

    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in completion.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current.join("\n"));
    }
    sections
}

/// "Q: text" → (Question, "text"); case-insensitive label
fn split_label(line: &str) -> Option<(Label, &str)> {
    let label = match line.get(..2)? {
        "Q:" | "q:" => Label::Question,
        "A:" | "a:" => Label::Answer,
        _ => return None,
    };
    Some((label, line[2..].trim()))
}

fn parse_section(section: &str) -> Option<Flashcard> {
    let lines: Vec<&str> = section
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut question: Option<String> = None;
    let mut answer:   Option<String> = None;
    let mut unlabelled: Vec<&str>    = Vec::new();

    // ── Pass 1: explicit labels ───────────────────────────────────────────────
    for &line in &lines {
        match split_label(line) {
            Some((Label::Question, text)) => {
                if !text.is_empty() {
                    question = Some(text.to_string());
                }
            }
            Some((Label::Answer, text)) => {
                if !text.is_empty() {
                    answer = Some(text.to_string());
                }
            }
            None => unlabelled.push(line),
        }
    }

    // ── Pass 2: positional inference ──────────────────────────────────────────
    if question.is_none() {
        if let Some(first) = unlabelled.first() {
            question = Some(first.to_string());
            if first.ends_with('?') && answer.is_none() {
                answer = unlabelled.get(1).map(|s| s.to_string());
            }
        }
    }

    question.map(|q| Flashcard::candidate(q, answer))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flashcard::{Difficulty, NO_ANSWER_PLACEHOLDER};

    fn qa(cards: &[Flashcard]) -> Vec<(&str, &str)> {
        cards.iter().map(|c| (c.question.as_str(), c.answer.as_str())).collect()
    }

    #[test]
    fn test_labelled_and_unlabelled_sections() {
        let cards = OutputParser::new().parse("Q: What is X?\nA: X is Y.\n---\nWhat is Z?");
        assert_eq!(
            qa(&cards),
            vec![("What is X?", "X is Y."), ("What is Z?", NO_ANSWER_PLACEHOLDER)]
        );
        assert!(cards.iter().all(|c| c.difficulty == Difficulty::Medium));
    }

    #[test]
    fn test_n_labelled_sections_keep_order() {
        let completion: String = (1..=5)
            .map(|i| format!("Q: Question number {i}?\nA: Answer {i}.\n---\n"))
            .collect();
        let cards = OutputParser::new().parse(&completion);
        assert_eq!(cards.len(), 5);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.question, format!("Question number {}?", i + 1));
            assert_eq!(card.answer, format!("Answer {}.", i + 1));
        }
    }

    #[test]
    fn test_blank_line_fallback() {
        let cards = OutputParser::new().parse(
            "What is a cell?\nThe basic unit of life.\n\n  \nWhat is DNA?\nGenetic material.",
        );
        assert_eq!(
            qa(&cards),
            vec![("What is a cell?", "The basic unit of life."), ("What is DNA?", "Genetic material.")]
        );
    }

    #[test]
    fn test_labels_are_order_independent_and_last_wins() {
        let cards = OutputParser::new().parse("A: first answer\nQ: Old question?\nQ: New question?\nA: second answer");
        assert_eq!(qa(&cards), vec![("New question?", "second answer")]);
    }

    #[test]
    fn test_answer_label_inside_question_is_text() {
        let cards = OutputParser::new().parse("Q: What does vitamin A: do for eyes?\nA: It supports vision.");
        assert_eq!(qa(&cards), vec![("What does vitamin A: do for eyes?", "It supports vision.")]);
    }

    #[test]
    fn test_statement_line_becomes_question_without_answer() {
        let cards = OutputParser::new().parse("Plants need light\nand water too");
        assert_eq!(qa(&cards), vec![("Plants need light", NO_ANSWER_PLACEHOLDER)]);
    }

    #[test]
    fn test_answer_label_without_question_uses_first_plain_line() {
        let cards = OutputParser::new().parse("Explain osmosis\nA: Water moving across a membrane.");
        assert_eq!(qa(&cards), vec![("Explain osmosis", "Water moving across a membrane.")]);
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let parser = OutputParser::new();
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("---\n\n---\n   \n---").is_empty());
        assert!(parser.parse("A: an answer with no question").is_empty());
    }
}
