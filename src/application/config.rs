// ============================================================
// Layer 2 - Run Configuration
// ============================================================
// All tunables for a generation run, grouped by who uses them:
//
//   GeneratorConfig - pipeline limits (input length, chunk
//                     budget, validation thresholds)
//   ModelConfig     - where the model lives and how to sample
//
// Both are serialisable so a run can be reproduced from a JSON
// file (see infra::config_store); CLI flags override whatever
// the file says.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::postprocessor::{
    DEFAULT_MIN_ANSWER_CHARS, DEFAULT_MIN_QUESTION_CHARS, DEFAULT_REPAIR_CUTOFF,
};

// ─── GeneratorConfig ─────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Inputs shorter than this (trimmed, in chars) are rejected
    /// before any model call
    pub min_input_chars:    usize,
    /// Token budget per chunk
    pub max_chunk_tokens:   usize,
    /// Generation-length budget per model call
    pub max_output_tokens:  usize,
    pub min_question_chars: usize,
    pub min_answer_chars:   usize,
    /// Similarity a source sentence needs to fill a missing answer
    pub repair_cutoff:      f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_input_chars:    100,
            max_chunk_tokens:   400,
            max_output_tokens:  300,
            min_question_chars: DEFAULT_MIN_QUESTION_CHARS,
            min_answer_chars:   DEFAULT_MIN_ANSWER_CHARS,
            repair_cutoff:      DEFAULT_REPAIR_CUTOFF,
        }
    }
}

impl GeneratorConfig {
    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_chunk_tokens > 0, "max_chunk_tokens must be at least 1");
        ensure!(self.max_output_tokens > 0, "max_output_tokens must be at least 1");
        ensure!(
            (0.0..=1.0).contains(&self.repair_cutoff),
            "repair_cutoff must be between 0.0 and 1.0 (got {})",
            self.repair_cutoff
        );
        Ok(())
    }
}

// ─── ModelConfig ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the text-generation server
    pub endpoint:         String,
    pub temperature:      f32,
    /// Prompt tokens the model can read; longer prompts are
    /// truncated by the server
    pub max_input_tokens: usize,
    pub timeout_secs:     u64,
    /// HuggingFace tokenizer.json used to measure chunks.
    /// None → count words.
    pub tokenizer_path:   Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint:         "http://127.0.0.1:8080".to_string(),
            temperature:      0.7,
            max_input_tokens: 512,
            timeout_secs:     120,
            tokenizer_path:   None,
        }
    }
}

// ─── AppConfig ────────────────────────────────────────────────────────────────
/// Everything a config file can hold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub model:     ModelConfig,
}
