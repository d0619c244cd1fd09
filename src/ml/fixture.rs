// ============================================================
// Layer 5 - Scripted Completion (tests only)
// ============================================================
// A deterministic stand-in for the model: returns queued
// completions (or errors) in order and remembers every prompt
// it was given. Once the queue is empty it answers with an
// empty string, which parses to zero cards.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::domain::error::CompletionError;
use crate::domain::traits::CompletionService;

pub struct ScriptedCompletion {
    responses: RefCell<VecDeque<Result<String, CompletionError>>>,
    prompts:   RefCell<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(responses: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            prompts:   RefCell::new(Vec::new()),
        }
    }

    /// Same completion for the first `times` calls
    pub fn repeating(completion: &str, times: usize) -> Self {
        Self::new(vec![Ok(completion.to_string()); times])
    }

    /// Every prompt received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl CompletionService for ScriptedCompletion {
    fn complete(&self, prompt: &str, _max_output_tokens: usize) -> Result<String, CompletionError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}
