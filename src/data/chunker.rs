// ============================================================
// Layer 4 - Text Chunker
// ============================================================
// Splits cleaned text into pieces that fit the model's input
// budget.
//
// Why do we need chunking?
//   Seq2seq models have a small context window (Flan-T5 reads
//   512 tokens, and the prompt template eats part of that).
//   Truncating would silently drop most of a long chapter, so
//   instead we feed the model one chunk at a time.
//
// Strategy: greedy sentence packing
//   - Text under budget → one chunk, untouched
//   - Otherwise split after every ". " and append sentences to
//     the current chunk until the next one would overflow it
//   - A chunk is only flushed when it already holds something,
//     so a single sentence longer than the budget still becomes
//     its own (oversized) chunk rather than being cut mid-way
//
// Example with a budget of 6 words:
//   Text:    "One two three. Four five six. Seven eight nine."
//   Chunk 1: "One two three. Four five six."
//   Chunk 2: "Seven eight nine."
//
// Joining the chunks with a single space gives back the input.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

use crate::domain::traits::TokenCounter;

/// Sentence boundary used for packing
const SENTENCE_BOUNDARY: &str = ". ";

// ─── WhitespaceCounter ────────────────────────────────────────────────────────
/// Counts one token-equivalent per whitespace-separated word.
/// Used when no tokenizer file is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceCounter;

impl TokenCounter for WhitespaceCounter {
    fn count_tokens(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

// ─── Chunker ──────────────────────────────────────────────────────────────────
pub struct Chunker {
    /// Largest token count a chunk may reach (unless a single
    /// sentence alone is bigger)
    max_tokens: usize,
    /// How tokens are measured
    counter: Box<dyn TokenCounter>,
}

impl Chunker {
    /// Create a new Chunker.
    ///
    /// # Panics
    /// Panics if max_tokens is 0, because no text could ever fit
    pub fn new(max_tokens: usize, counter: Box<dyn TokenCounter>) -> Self {
        assert!(max_tokens > 0, "max_tokens must be at least 1");
        Self { max_tokens, counter }
    }

    /// Chunker measuring words instead of model tokens
    #[cfg(test)]
    pub fn with_word_budget(max_tokens: usize) -> Self {
        Self::new(max_tokens, Box::new(WhitespaceCounter))
    }

    /// Split text into ordered chunks. Returns an empty Vec only
    /// for blank input.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        // Fast path: everything fits in one model call
        if self.counter.count_tokens(text) <= self.max_tokens {
            return vec![text.to_string()];
        }

        let mut chunks  = Vec::new();
        let mut current = String::new();

        // split_inclusive keeps the ". " on each sentence, so no
        // punctuation is invented or lost at the seams
        for sentence in text.split_inclusive(SENTENCE_BOUNDARY) {
            let mut candidate = current.clone();
            candidate.push_str(sentence);

            let overflows = self.counter.count_tokens(candidate.trim()) > self.max_tokens;
            if overflows && !current.trim().is_empty() {
                chunks.push(current.trim().to_string());
                current = sentence.to_string();
            } else {
                current = candidate;
            }
        }

        if !current.trim().is_empty() {
            chunks.push(current.trim().to_string());
        }

        tracing::debug!(
            "Split {} chars into {} chunks (budget {} tokens)",
            text.len(),
            chunks.len(),
            self.max_tokens
        );

        chunks
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_gives_one_chunk() {
        let c      = Chunker::with_word_budget(100);
        let chunks = c.chunk("Just a few words. And a second sentence.");
        assert_eq!(chunks, vec!["Just a few words. And a second sentence."]);
    }

    #[test]
    fn test_packs_sentences_greedily() {
        let c      = Chunker::with_word_budget(6);
        let chunks = c.chunk("One two three. Four five six. Seven eight nine.");
        assert_eq!(chunks, vec!["One two three. Four five six.", "Seven eight nine."]);
    }

    #[test]
    fn test_oversized_sentence_is_kept_whole() {
        let c      = Chunker::with_word_budget(3);
        let chunks = c.chunk("a b c d e f g h. i j.");
        assert_eq!(chunks, vec!["a b c d e f g h.", "i j."]);
    }

    #[test]
    fn test_chunks_rejoin_to_input() {
        let text: String = (0..40)
            .map(|i| format!("Sentence number {i} talks about cells and energy. "))
            .collect();
        let text   = text.trim().to_string();
        let c      = Chunker::with_word_budget(25);
        let chunks = c.chunk(&text);

        assert!(chunks.len() > 1);
        assert_eq!(chunks.join(" "), text);
        // Every chunk respects the budget since no sentence exceeds it
        for chunk in &chunks {
            assert!(WhitespaceCounter.count_tokens(chunk) <= 25);
        }
    }

    #[test]
    fn test_text_without_boundaries_is_one_chunk() {
        let c    = Chunker::with_word_budget(2);
        let text = "no sentence boundary anywhere in here";
        assert_eq!(c.chunk(text), vec![text]);
    }

    #[test]
    fn test_empty_text_gives_no_chunks() {
        let c = Chunker::with_word_budget(5);
        assert!(c.chunk("").is_empty());
        assert!(c.chunk("   ").is_empty());
    }

    #[test]
    #[should_panic]
    fn test_zero_budget_is_rejected() {
        let _ = Chunker::with_word_budget(0);
    }
}
