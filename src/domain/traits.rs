// ============================================================
// Layer 3 - Core Traits (Capabilities)
// ============================================================
// The pipeline only ever talks to these traits, never to a
// concrete model, tokenizer or file format. Each run receives
// its collaborators explicitly, so tests can swap in scripted
// doubles and the CLI can wire up the real HTTP adapter.
//
//   DocumentSource   → where the study text comes from
//   TokenCounter     → how the chunk budget is measured
//   CompletionService→ the opaque text-completion model
//   FlashcardSource  → "turn one chunk into candidate cards"
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;

use crate::domain::document::Document;
use crate::domain::error::CompletionError;
use crate::domain::flashcard::Flashcard;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can load study documents.
///
/// Implementations:
///   - InputLoader → a .txt/.md/.docx file or a directory of them
pub trait DocumentSource {
    /// Load every available document from this source.
    fn load_all(&self) -> Result<Vec<Document>>;
}

// ─── TokenCounter ─────────────────────────────────────────────────────────────
/// Measures text in the units the model's context window uses.
///
/// Implementations:
///   - WhitespaceCounter    → one token per word (no tokenizer file)
///   - tokenizers::Tokenizer → the model's real vocabulary
pub trait TokenCounter {
    fn count_tokens(&self, text: &str) -> usize;
}

// ─── CompletionService ────────────────────────────────────────────────────────
/// The language model, seen as a black box that continues a prompt.
///
/// Output is sampled, so two calls with the same prompt may
/// return different text. Nothing about the requested format is
/// guaranteed.
pub trait CompletionService {
    fn complete(&self, prompt: &str, max_output_tokens: usize) -> Result<String, CompletionError>;
}

/// Shared references forward to the underlying service, so one
/// service can back several sources.
impl<C: CompletionService + ?Sized> CompletionService for &C {
    fn complete(&self, prompt: &str, max_output_tokens: usize) -> Result<String, CompletionError> {
        (**self).complete(prompt, max_output_tokens)
    }
}

// ─── FlashcardSource ──────────────────────────────────────────────────────────
/// Anything that can produce candidate flashcards for one
/// prompt-ready chunk of text.
///
/// Implementations:
///   - ModelFlashcardSource → prompt builder + completion + parser
///
/// An empty Vec is a normal outcome; an Err means the model call
/// itself failed and the orchestrator should skip this chunk.
pub trait FlashcardSource {
    fn flashcards_for_chunk(
        &self,
        chunk:     &str,
        num_cards: usize,
    ) -> Result<Vec<Flashcard>, CompletionError>;
}
