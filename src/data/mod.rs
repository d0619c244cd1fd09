// ============================================================
// Layer 4 - Text Pipeline
// ============================================================
// Everything that happens to text outside the model call.
//
//   study files
//       │
//       ▼
//   InputLoader      → reads .txt/.md/.docx, extracts raw text
//       │
//       ▼
//   Preprocessor     → strips links/emails, collapses whitespace
//       │
//       ▼
//   Chunker          → packs sentences into model-sized chunks
//       │
//       ▼
//   (Layer 5: prompt → model → parse, once per chunk)
//       │
//       ▼
//   PostProcessor    → validates, repairs, tags, deduplicates
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads study files from disk using docx-rs for .docx
pub mod loader;

/// Cleans and normalises raw text
pub mod preprocessor;

/// Splits long text into sentence-aligned chunks
pub mod chunker;

/// Gestalt similarity used to repair missing answers
pub mod similarity;

/// Validation, repair and deduplication of parsed cards
pub mod postprocessor;
