// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the outside world:
//
//   tokenizer_store.rs - Loads the model's tokenizer.json so
//                        chunk budgets are measured in real
//                        model tokens (falls back to words)
//
//   config_store.rs    - Saves and loads AppConfig as JSON so a
//                        run's settings can be reused
//
//   exporter.rs        - Writes the final cards as CSV, JSON,
//                        Anki or Quizlet files
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Rust Book §12 (I/O and File Handling)

/// Tokenizer loading and token counting
pub mod tokenizer_store;

/// JSON persistence for run configuration
pub mod config_store;

/// Study-tool export formats
pub mod exporter;
