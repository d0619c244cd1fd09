// ============================================================
// Layer 5 - Model Completion
// ============================================================
// Two pieces live here:
//
//   HttpCompletionService - talks to a text-generation server
//                           (HuggingFace text-generation-inference
//                           and compatible) hosting the seq2seq
//                           model, e.g. google/flan-t5-base
//
//   ModelFlashcardSource  - the model-backed FlashcardSource:
//                           build prompt → complete → parse
//
// Wire format (POST {endpoint}/generate):
//   request:  {"inputs": "<prompt>",
//              "parameters": {"max_new_tokens": 300,
//                             "temperature": 0.7,
//                             "do_sample": true,
//                             "truncate": 512}}
//   response: {"generated_text": "..."}
//             or [{"generated_text": "..."}]
//
// Sampling is on, so identical prompts may come back with
// different cards.
//
// Reference: reqwest blocking client documentation

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::config::ModelConfig;
use crate::domain::error::CompletionError;
use crate::domain::flashcard::Flashcard;
use crate::domain::traits::{CompletionService, FlashcardSource};
use crate::ml::parser::OutputParser;
use crate::ml::prompt::PromptBuilder;

// ─── Wire types ───────────────────────────────────────────────────────────────
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs:     &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: usize,
    temperature:    f32,
    do_sample:      bool,
    /// Server-side truncation of the prompt to the model's input window
    truncate:       usize,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Single(GeneratedText),
    Batch(Vec<GeneratedText>),
}

impl GenerateResponse {
    fn into_text(self) -> Result<String, CompletionError> {
        match self {
            GenerateResponse::Single(g) => Ok(g.generated_text),
            GenerateResponse::Batch(batch) => batch
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .ok_or_else(|| CompletionError::Malformed("empty result array".into())),
        }
    }
}

// ─── HttpCompletionService ────────────────────────────────────────────────────
pub struct HttpCompletionService {
    client:           reqwest::blocking::Client,
    url:              String,
    temperature:      f32,
    max_input_tokens: usize,
}

impl HttpCompletionService {
    pub fn new(cfg: &ModelConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("Cannot build HTTP client for the completion service")?;

        Ok(Self {
            client,
            url:              format!("{}/generate", cfg.endpoint.trim_end_matches('/')),
            temperature:      cfg.temperature,
            max_input_tokens: cfg.max_input_tokens,
        })
    }

    fn request_body<'a>(&self, prompt: &'a str, max_output_tokens: usize) -> GenerateRequest<'a> {
        GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens: max_output_tokens,
                temperature:    self.temperature,
                do_sample:      true,
                truncate:       self.max_input_tokens,
            },
        }
    }
}

impl CompletionService for HttpCompletionService {
    fn complete(&self, prompt: &str, max_output_tokens: usize) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.url)
            .json(&self.request_body(prompt, max_output_tokens))
            .send()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CompletionError::Status { code: status.as_u16(), body });
        }

        let body = response
            .text()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<String, CompletionError> {
    serde_json::from_str::<GenerateResponse>(body)
        .map_err(|e| CompletionError::Malformed(e.to_string()))?
        .into_text()
}

// ─── ModelFlashcardSource ─────────────────────────────────────────────────────
/// Produces candidate cards for a chunk by prompting a model.
pub struct ModelFlashcardSource<C> {
    completion:        C,
    prompts:           PromptBuilder,
    parser:            OutputParser,
    /// Generation-length budget passed to every call
    max_output_tokens: usize,
}

impl<C: CompletionService> ModelFlashcardSource<C> {
    pub fn new(completion: C, max_output_tokens: usize) -> Self {
        Self {
            completion,
            prompts: PromptBuilder::new(),
            parser:  OutputParser::new(),
            max_output_tokens,
        }
    }
}

impl<C: CompletionService> FlashcardSource for ModelFlashcardSource<C> {
    fn flashcards_for_chunk(
        &self,
        chunk:     &str,
        num_cards: usize,
    ) -> Result<Vec<Flashcard>, CompletionError> {
        let prompt = self.prompts.build(chunk, num_cards);
        let raw    = self.completion.complete(&prompt, self.max_output_tokens)?;
        tracing::debug!("Raw model output: {raw}");

        Ok(self.parser.parse(&raw))
    }
}
