// ============================================================
// Layer 5 - Prompt Builder
// ============================================================
// Wraps one chunk of study text in the instruction the model
// sees.
//
// Instruction-tuned seq2seq models follow a format far more
// reliably when shown it, so the template carries:
//   - the card count for this chunk
//   - an explicit "Q: / A: / ---" format directive
//   - a block of worked examples on unrelated topics
//   - the chunk itself
//
// Building a prompt is deterministic: same chunk and count,
// same string.

/// Line separating cards in both the examples and the model output
pub const CARD_DELIMITER: &str = "---";

/// Format demonstrations. Deliberately unrelated to any input so
/// the model copies the shape, not the content.
const WORKED_EXAMPLES: &[(&str, &str)] = &[
    (
        "What is photosynthesis?",
        "Photosynthesis is the process by which green plants use sunlight to make food from carbon dioxide and water.",
    ),
    ("Who painted the Mona Lisa?", "Leonardo da Vinci painted the Mona Lisa."),
    ("What is the capital of France?", "Paris is the capital of France."),
    ("What is the boiling point of water at sea level?", "Water boils at 100 degrees Celsius at sea level."),
    (
        "What was the main cause of the French Revolution?",
        "Widespread debt, food shortages and resentment of aristocratic privilege.",
    ),
    ("What is the main idea of the passage?", "The main idea is the struggle of a nation for independence."),
    (
        "What is the significance of the Renaissance?",
        "The Renaissance marked a period of cultural, artistic and scientific rebirth in Europe.",
    ),
    ("What is Rust used for?", "Rust is used for systems programming, command-line tools and web services."),
    ("What does DNA stand for?", "DNA stands for deoxyribonucleic acid."),
    ("What is human respiration?", "Human respiration is inhaling oxygen and exhaling carbon dioxide."),
];

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the full prompt for `chunk`, asking for `num_cards` cards
    pub fn build(&self, chunk: &str, num_cards: usize) -> String {
        let mut examples = String::new();
        for (question, answer) in WORKED_EXAMPLES {
            examples.push_str(&format!("Q: {question}\nA: {answer}\n{CARD_DELIMITER}\n"));
        }

        format!(
            "Read the following text and generate {num_cards} flashcards. \
             For each flashcard, you MUST provide both a question and a short, factual answer, \
             based only on the text. Format each as:\n\
             Q: <question>\n\
             A: <answer>\n\
             {CARD_DELIMITER}\n\
             \n\
             Here are some examples:\n\
             {examples}\n\
             Text:\n\
             {chunk}\n\
             \n\
             Flashcards:\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeds_chunk_and_count() {
        let prompt = PromptBuilder::new().build("Mitochondria make ATP.", 3);
        assert!(prompt.contains("generate 3 flashcards"));
        assert!(prompt.contains("Text:\nMitochondria make ATP.\n"));
        assert!(prompt.ends_with("Flashcards:\n"));
    }

    #[test]
    fn test_contains_format_directive_and_examples() {
        let prompt = PromptBuilder::new().build("x", 1);
        assert!(prompt.contains("Q: <question>\nA: <answer>\n---\n"));
        assert!(prompt.contains("Q: Who painted the Mona Lisa?\nA: Leonardo da Vinci painted the Mona Lisa.\n---\n"));
        assert_eq!(prompt.matches("\nQ: ").count(), WORKED_EXAMPLES.len() + 1);
    }

    #[test]
    fn test_is_deterministic() {
        let b = PromptBuilder::new();
        assert_eq!(b.build("Same chunk.", 4), b.build("Same chunk.", 4));
    }
}
