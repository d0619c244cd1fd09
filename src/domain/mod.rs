// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Pure Rust structs, enums and traits describing what a
// flashcard run is made of.
//
// Rules for this layer:
//   - NO network or file I/O
//   - NO model-specific code (prompts, HTTP payloads)
//   - Only plain Rust types and the capability traits the
//     other layers implement
//
// Keeping this layer pure means the whole pipeline can be
// unit tested against a scripted model with no server running.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A loaded input document
pub mod document;

// The flashcard entity and its difficulty levels
pub mod flashcard;

// Error conditions surfaced to callers
pub mod error;

// Capability traits that other layers implement
pub mod traits;
