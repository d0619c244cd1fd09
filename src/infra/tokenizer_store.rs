// ============================================================
// Layer 6 - Tokenizer Store
// ============================================================
// Loads the model's HuggingFace tokenizer so chunk budgets are
// measured in real model tokens rather than words.
//
// Flan-T5 ships its tokenizer as a single tokenizer.json; the
// path is configured with --tokenizer / model.tokenizer_path.
// Without one, the chunker falls back to counting words, which
// undercounts slightly for T5's subword vocabulary.
//
// Reference: HuggingFace tokenizers crate documentation

use anyhow::Result;
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::data::chunker::WhitespaceCounter;
use crate::domain::traits::TokenCounter;

pub struct TokenizerStore {
    path: PathBuf,
}

impl TokenizerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load a previously saved tokenizer from its JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let tokenizer = Tokenizer::from_file(&self.path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", self.path.display(), e
            ))?;
        tracing::info!("Loaded tokenizer from '{}'", self.path.display());
        Ok(tokenizer)
    }
}

/// Counts encoded ids, special tokens included, since they
/// occupy the context window too
impl TokenCounter for Tokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        match self.encode(text, true) {
            Ok(encoding) => encoding.get_ids().len(),
            Err(e) => {
                tracing::debug!("Tokenizer failed ({e}), counting words instead");
                WhitespaceCounter.count_tokens(text)
            }
        }
    }
}

/// The counter for an optional tokenizer path
pub fn token_counter(tokenizer_path: Option<&str>) -> Result<Box<dyn TokenCounter>> {
    match tokenizer_path {
        Some(path) => Ok(Box::new(TokenizerStore::new(path).load()?)),
        None => {
            tracing::debug!("No tokenizer configured, measuring chunks in words");
            Ok(Box::new(WhitespaceCounter))
        }
    }
}
