// ============================================================
// Layer 5 - Model Layer
// ============================================================
// Everything that knows the model speaks in prompts and free
// text. No other layer builds a prompt or reads raw output.
//
//   prompt.rs     - instruction template with worked examples
//                   and the "Q: / A: / ---" format directive
//
//   parser.rs     - tolerant extraction of Q/A candidates from
//                   free-form completions
//
//   completion.rs - HTTP adapter for a text-generation server
//                   and the model-backed FlashcardSource
//
// The model itself stays a black box behind the
// CompletionService trait from Layer 3.

/// Prompt template for one chunk
pub mod prompt;

/// Completion → candidate flashcards
pub mod parser;

/// Text-generation server client and model-backed card source
pub mod completion;

/// Deterministic completion double for tests
#[cfg(test)]
pub mod fixture;
