// ============================================================
// Layer 3 - Document Domain Type
// ============================================================
// A single piece of study material loaded from disk: where it
// came from and the raw text extracted from it. Plain data,
// no behaviour beyond construction.

use serde::{Deserialize, Serialize};

/// Raw study material, before any cleaning.
/// By the time a Document exists the text has already been
/// extracted from its file format (.docx, .txt, .md).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The filename, kept so log lines can point at the input
    pub source: String,

    /// The full extracted text, untouched by the preprocessor
    pub text: String,
}

impl Document {
    /// Create a new Document with a source name and text content.
    ///
    /// Example:
    ///   let doc = Document::new("biology.txt", "Photosynthesis converts...");
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }

    /// Number of characters in the text, ignoring surrounding whitespace
    pub fn char_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}
