// ============================================================
// Layer 4 - Text Preprocessor
// ============================================================
// Cleans raw study text before it is chunked and sent to the
// model.
//
// Pasted notes and exported documents usually carry noise the
// model would happily turn into useless cards:
//   - Links (https://..., ftp://...)
//   - Email addresses
//   - Tabs, line breaks, non-breaking spaces and long runs of
//     indentation
//
// Cleaning steps (applied in order):
//   1. Remove URL-like substrings (scheme://...)
//   2. Remove email-like substrings (anything around an '@')
//   3. Collapse every whitespace run into a single space
//   4. Trim the ends
//
// Newlines are NOT preserved: the chunker splits on sentence
// boundaries, not paragraphs.
//
// Reference: regex crate documentation
//            Rust Book §8 (Strings in Rust)

use once_cell::sync::Lazy;
use regex::Regex;

/// `scheme://` followed by everything up to the next whitespace
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9+.\-]*://\S+").expect("valid URL pattern")
});

/// Any whitespace-delimited token containing '@', plus one
/// trailing whitespace character
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S*@\S*\s?").expect("valid email pattern")
});

pub struct Preprocessor;

impl Preprocessor {
    /// Create a new Preprocessor instance
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw text string. Pure: same input, same output.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1 + 2: Drop links and addresses ──────────────────────────────
        let without_urls   = URL_RE.replace_all(text, " ");
        let without_emails = EMAIL_RE.replace_all(&without_urls, " ");

        // ── Step 3 + 4: Collapse whitespace and trim ──────────────────────────
        // split_whitespace() already skips leading/trailing runs and
        // treats every Unicode whitespace char (tabs, NBSP, \r) alike
        without_emails
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Implement Default so Preprocessor can be created with Preprocessor::default()
impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello \t\n\n  world"), "hello world");
    }

    #[test]
    fn test_trims_edges() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  hello world  "), "hello world");
    }

    #[test]
    fn test_strips_urls() {
        let p = Preprocessor::new();
        assert_eq!(
            p.clean("Read https://example.com/a?b=c first. Then ftp://files.org/x too."),
            "Read first. Then too."
        );
    }

    #[test]
    fn test_strips_emails() {
        let p = Preprocessor::new();
        assert_eq!(
            p.clean("Contact jane.doe@school.edu for the syllabus."),
            "Contact for the syllabus."
        );
    }

    #[test]
    fn test_non_breaking_space_is_whitespace() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("a\u{00A0}\u{00A0}b"), "a b");
    }

    #[test]
    fn test_only_noise_becomes_empty() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  https://a.b/c   x@y.z \n"), "");
        assert_eq!(p.clean(""), "");
    }
}
