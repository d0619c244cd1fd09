// ============================================================
// Layer 3 - Error Conditions
// ============================================================
// Two families of errors cross layer boundaries:
//
//   GenerationError - why a whole run produced nothing. The
//                     orchestrator never panics or bubbles a
//                     raw error; it hands one of these back
//                     next to an empty card list.
//
//   CompletionError - why a single model call failed. The
//                     orchestrator logs it and moves on to the
//                     next chunk.
//
// The Display strings are what a user sees, so they are full
// sentences.

use thiserror::Error;

/// Why a generation run ended with no cards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Source text was below the minimum length before cleaning
    #[error("Input text is too short (min {min} characters required).")]
    InputTooShort { min: usize, actual: usize },

    /// Nothing was left once URLs, emails and whitespace were stripped
    #[error("Input text is empty after preprocessing.")]
    EmptyAfterCleaning,

    /// The caller asked for zero cards
    #[error("Requested card count must be at least 1.")]
    InvalidCardCount,

    /// The model answered but no valid card survived parsing and repair
    #[error("Model could not generate flashcards. Try a longer or more detailed input.")]
    NothingUsable,

    /// Every model call failed, or something else unexpected happened
    #[error("error: {0}")]
    Failed(String),
}

/// Failure of a single completion request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The request never got a response (connect, timeout, TLS)
    #[error("completion request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("completion service returned {code}: {body}")]
    Status { code: u16, body: String },

    /// The response body was not in the expected shape
    #[error("malformed completion response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        let e = GenerationError::InputTooShort { min: 100, actual: 12 };
        assert_eq!(e.to_string(), "Input text is too short (min 100 characters required).");
        assert_eq!(
            GenerationError::Failed("boom".into()).to_string(),
            "error: boom"
        );
    }
}
