// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Coordinates the other layers to turn study text into cards.
//
// Rules for this layer:
//   - No prompt text or HTTP here (that's Layer 5)
//   - No printing or file writing (that's Layer 1 and 6)
//   - Only workflow coordination and run configuration
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Pipeline and model settings
pub mod config;

// The text → flashcards workflow
pub mod generate_use_case;
