// ============================================================
// Layer 2 - GenerateUseCase (Pipeline Orchestrator)
// ============================================================
// Drives one flashcard run end to end:
//
//   Step 1: Reject short input          (before any cleaning)
//   Step 2: Clean the text              (Layer 4 - data)
//   Step 3: Chunk into model-sized text (Layer 4 - data)
//   Step 4: Per chunk, in order:        (Layer 5 - ml)
//             budget → prompt → model → parse
//   Step 5: Trim the aggregate to the requested count
//   Step 6: Validate/repair/dedup       (Layer 4 - data)
//
// Card budget per chunk:
//   base = num_cards / chunk_count (at least 1)
//   every chunk asks for `base`, except the last, which asks
//   for whatever is still missing (at least 1). The loop stops
//   as soon as enough candidates have been collected.
//
// Failure policy: one failing model call costs one chunk, not
// the run. `generate` never returns Err; an empty result always
// comes with a GenerationError explaining why.
//
// Chunks run strictly in sequence because each budget depends
// on what earlier chunks produced.

use crate::application::config::GeneratorConfig;
use crate::data::{chunker::Chunker, postprocessor::PostProcessor, preprocessor::Preprocessor};
use crate::domain::error::{CompletionError, GenerationError};
use crate::domain::flashcard::{DifficultyLevel, Flashcard};
use crate::domain::traits::{FlashcardSource, TokenCounter};

// ─── Generation ───────────────────────────────────────────────────────────────
/// Outcome of a run: the cards, plus the reason whenever there
/// are none.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub cards: Vec<Flashcard>,
    pub error: Option<GenerationError>,
}

impl From<Result<Vec<Flashcard>, GenerationError>> for Generation {
    fn from(result: Result<Vec<Flashcard>, GenerationError>) -> Self {
        match result {
            Ok(cards) => Self { cards, error: None },
            Err(e)    => Self { cards: Vec::new(), error: Some(e) },
        }
    }
}

// ─── ChunkPlanner ─────────────────────────────────────────────────────────────
/// Steps 1-3: input checks, cleaning and chunking. Split out so
/// a dry run can show the chunks without a model.
pub struct ChunkPlanner {
    min_input_chars: usize,
    preprocessor:    Preprocessor,
    chunker:         Chunker,
}

impl ChunkPlanner {
    pub fn new(config: &GeneratorConfig, counter: Box<dyn TokenCounter>) -> Self {
        Self {
            min_input_chars: config.min_input_chars,
            preprocessor:    Preprocessor::new(),
            chunker:         Chunker::new(config.max_chunk_tokens, counter),
        }
    }

    /// Validate, clean and chunk `text`
    pub fn prepare(&self, text: &str) -> Result<Vec<String>, GenerationError> {
        let actual = text.trim().chars().count();
        if actual < self.min_input_chars {
            tracing::warn!("Input text too short for flashcard generation ({actual} chars)");
            return Err(GenerationError::InputTooShort { min: self.min_input_chars, actual });
        }

        let cleaned = self.preprocessor.clean(text);
        tracing::debug!("Cleaned text length: {}", cleaned.len());
        if cleaned.is_empty() {
            tracing::warn!("Empty text after preprocessing");
            return Err(GenerationError::EmptyAfterCleaning);
        }

        let chunks = self.chunker.chunk(&cleaned);
        tracing::info!("Created {} chunks", chunks.len());
        Ok(chunks)
    }
}

/// Cards to request from chunk `index`, given how many
/// candidates earlier chunks already produced
pub fn card_budget(index: usize, chunk_count: usize, num_cards: usize, produced: usize) -> usize {
    if index + 1 == chunk_count {
        num_cards.saturating_sub(produced).max(1)
    } else {
        (num_cards / chunk_count).max(1)
    }
}

// ─── GenerateUseCase ──────────────────────────────────────────────────────────
pub struct GenerateUseCase<S> {
    planner:       ChunkPlanner,
    postprocessor: PostProcessor,
    source:        S,
}

impl<S: FlashcardSource> GenerateUseCase<S> {
    /// `source` turns chunks into candidate cards; `counter`
    /// measures chunks in the source model's token units.
    pub fn new(config: &GeneratorConfig, source: S, counter: Box<dyn TokenCounter>) -> Self {
        Self {
            planner: ChunkPlanner::new(config, counter),
            postprocessor: PostProcessor::new(
                config.min_question_chars,
                config.min_answer_chars,
                config.repair_cutoff,
            ),
            source,
        }
    }

    /// Run the pipeline. Never fails: an empty card list always
    /// comes with the reason.
    pub fn generate(&self, text: &str, num_cards: usize, level: DifficultyLevel) -> Generation {
        let generation = Generation::from(self.try_generate(text, num_cards, level));
        if let Some(e) = &generation.error {
            tracing::warn!("No flashcards generated: {e}");
        }
        generation
    }

    /// Run the pipeline, reporting an empty result as Err
    pub fn try_generate(
        &self,
        text:      &str,
        num_cards: usize,
        level:     DifficultyLevel,
    ) -> Result<Vec<Flashcard>, GenerationError> {
        tracing::info!("Generating {num_cards} flashcards, difficulty: {level}");
        if num_cards == 0 {
            return Err(GenerationError::InvalidCardCount);
        }

        // ── Steps 1-3: Validate, clean, chunk ─────────────────────────────────
        let chunks = self.planner.prepare(text)?;

        // ── Step 4: Ask the model, chunk by chunk ─────────────────────────────
        let mut candidates: Vec<Flashcard>            = Vec::new();
        let mut completed                             = 0usize;
        let mut last_failure: Option<CompletionError> = None;

        for (i, chunk) in chunks.iter().enumerate() {
            let budget = card_budget(i, chunks.len(), num_cards, candidates.len());

            match self.source.flashcards_for_chunk(chunk, budget) {
                Ok(cards) => {
                    tracing::debug!("Chunk {}/{}: asked {budget}, parsed {}", i + 1, chunks.len(), cards.len());
                    completed += 1;
                    candidates.extend(cards);
                }
                Err(e) => {
                    tracing::warn!("Chunk {}/{} failed, skipping: {e}", i + 1, chunks.len());
                    last_failure = Some(e);
                }
            }

            if candidates.len() >= num_cards {
                break;
            }
        }

        if completed == 0 {
            if let Some(e) = last_failure {
                return Err(GenerationError::Failed(e.to_string()));
            }
        }

        // ── Step 5: Trim to the request ───────────────────────────────────────
        candidates.truncate(num_cards);
        if candidates.is_empty() {
            tracing::warn!("Model returned no flashcards");
            return Err(GenerationError::NothingUsable);
        }

        // ── Step 6: Validate, repair, deduplicate ─────────────────────────────
        // Repair searches the caller's text, not the cleaned one
        let mut cards = self.postprocessor.process(candidates, level, Some(text));
        cards.truncate(num_cards);
        if cards.is_empty() {
            return Err(GenerationError::NothingUsable);
        }

        tracing::info!("Generated {} valid flashcards", cards.len());
        Ok(cards)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::chunker::WhitespaceCounter;
    use crate::domain::flashcard::{Difficulty, NO_ANSWER_PLACEHOLDER};
    use crate::ml::completion::ModelFlashcardSource;
    use crate::ml::fixture::ScriptedCompletion;

    const PHOTOSYNTHESIS: &str = "Photosynthesis converts light into chemical energy. ";

    fn use_case<'a>(
        model:  &'a ScriptedCompletion,
        config: &GeneratorConfig,
    ) -> GenerateUseCase<ModelFlashcardSource<&'a ScriptedCompletion>> {
        GenerateUseCase::new(config, ModelFlashcardSource::new(model, 300), Box::new(WhitespaceCounter))
    }

    /// Text of `n` distinct 7-word sentences
    fn long_text(n: usize) -> String {
        (0..n).map(|i| format!("Fact number {i} is about plant cells. ")).collect()
    }

    #[test]
    fn test_short_input_is_rejected_without_model_call() {
        let model = ScriptedCompletion::new(vec![]);
        let uc    = use_case(&model, &GeneratorConfig::default());

        let out = uc.generate("Too short to study.", 5, DifficultyLevel::Mixed);
        assert!(out.cards.is_empty());
        assert!(matches!(out.error, Some(GenerationError::InputTooShort { min: 100, .. })));
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn test_noise_only_input_is_empty_after_cleaning() {
        let model = ScriptedCompletion::new(vec![]);
        let uc    = use_case(&model, &GeneratorConfig::default());
        let text  = "https://example.com/a/very/long/path/that/goes/on/and/on/for/quite/a/while/indeed/yes \
                     someone@example.com another.person@example.org third@example.net";

        let out = uc.generate(text, 3, DifficultyLevel::Mixed);
        assert_eq!(out.error, Some(GenerationError::EmptyAfterCleaning));
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn test_zero_cards_is_rejected() {
        let model = ScriptedCompletion::new(vec![]);
        let uc    = use_case(&model, &GeneratorConfig::default());
        let out   = uc.generate(&PHOTOSYNTHESIS.repeat(30), 0, DifficultyLevel::Mixed);
        assert_eq!(out.error, Some(GenerationError::InvalidCardCount));
    }

    #[test]
    fn test_single_chunk_scenario() {
        let model = ScriptedCompletion::repeating(
            "Q: What does photosynthesis convert?\nA: Light into chemical energy.\n---\n\
             Q: WHAT DOES PHOTOSYNTHESIS CONVERT?\nA: light into chemical energy.\n---\n\
             Q: Where does the energy come from?\nA: From light.\n---\n\
             Q: A third card?\nA: Never requested.",
            1,
        );
        let uc  = use_case(&model, &GeneratorConfig::default());
        let out = uc.generate(&PHOTOSYNTHESIS.repeat(30), 2, DifficultyLevel::Mixed);

        // 30 * 6 words = 180, under the 400 budget: one chunk, one call
        assert_eq!(model.calls(), 1);
        assert!(model.prompts()[0].contains("generate 2 flashcards"));
        assert_eq!(out.error, None);
        // Aggregate is trimmed to 2 before dedup collapses the pair
        assert_eq!(out.cards.len(), 1);
        assert_eq!(out.cards[0].question, "What does photosynthesis convert?");
    }

    #[test]
    fn test_fixed_difficulty_applies_to_all_cards() {
        let model = ScriptedCompletion::repeating(
            "Q: What does photosynthesis convert?\nA: Light into chemical energy.\n---\n\
             Q: What kind of energy results?\nA: Chemical energy.",
            1,
        );
        let uc  = use_case(&model, &GeneratorConfig::default());
        let out = uc.generate(&PHOTOSYNTHESIS.repeat(30), 5, DifficultyLevel::Hard);

        assert_eq!(out.cards.len(), 2);
        assert!(out.cards.iter().all(|c| c.difficulty == Difficulty::Hard));
    }

    #[test]
    fn test_budget_distribution_across_chunks() {
        let config = GeneratorConfig { max_chunk_tokens: 14, ..Default::default() };
        // 6 sentences of 7 words → 3 chunks of 2 sentences
        let model = ScriptedCompletion::new(vec![
            Ok("Q: First chunk card?\nA: One.".into()),
            Ok("Q: Second chunk card?\nA: Two.".into()),
            Ok("Q: Third chunk card?\nA: Three.".into()),
        ]);
        let uc  = use_case(&model, &config);
        let out = uc.generate(&long_text(6), 7, DifficultyLevel::Mixed);

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 3);
        // base = 7 / 3 = 2; last chunk asks for 7 - 2 produced = 5
        assert!(prompts[0].contains("generate 2 flashcards"));
        assert!(prompts[1].contains("generate 2 flashcards"));
        assert!(prompts[2].contains("generate 5 flashcards"));
        assert_eq!(out.cards.len(), 3);
    }

    #[test]
    fn test_stops_early_and_truncates() {
        let config = GeneratorConfig { max_chunk_tokens: 14, ..Default::default() };
        let model = ScriptedCompletion::new(vec![Ok(
            "Q: Card one here?\nA: One.\n---\nQ: Card two here?\nA: Two.\n---\nQ: Card three here?\nA: Three.".into(),
        )]);
        let uc  = use_case(&model, &config);
        let out = uc.generate(&long_text(6), 2, DifficultyLevel::Mixed);

        assert_eq!(model.calls(), 1);
        assert_eq!(out.cards.len(), 2);
        assert_eq!(out.cards[1].question, "Card two here?");
    }

    #[test]
    fn test_failed_chunk_does_not_abort_run() {
        let config = GeneratorConfig { max_chunk_tokens: 14, ..Default::default() };
        let model = ScriptedCompletion::new(vec![
            Err(CompletionError::Transport("timed out".into())),
            Ok("Q: Second chunk card?\nA: Two.".into()),
            Ok("".into()),
        ]);
        let uc  = use_case(&model, &config);
        let out = uc.generate(&long_text(6), 3, DifficultyLevel::Mixed);

        assert_eq!(model.calls(), 3);
        assert_eq!(out.error, None);
        assert_eq!(out.cards.len(), 1);
    }

    #[test]
    fn test_all_chunks_failing_reports_error() {
        let model = ScriptedCompletion::new(vec![Err(CompletionError::Status {
            code: 503,
            body: "model loading".into(),
        })]);
        let uc  = use_case(&model, &GeneratorConfig::default());
        let out = uc.generate(&PHOTOSYNTHESIS.repeat(30), 2, DifficultyLevel::Mixed);

        assert!(out.cards.is_empty());
        match out.error {
            Some(GenerationError::Failed(detail)) => assert!(detail.contains("503")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_unusable_output_reports_nothing_usable() {
        let model = ScriptedCompletion::repeating("Hi?\nNo.", 1);
        let uc    = use_case(&model, &GeneratorConfig::default());
        let out   = uc.generate(&PHOTOSYNTHESIS.repeat(30), 2, DifficultyLevel::Mixed);

        assert!(out.cards.is_empty());
        assert_eq!(out.error, Some(GenerationError::NothingUsable));
    }

    #[test]
    fn test_unanswered_question_keeps_placeholder() {
        let text  = format!(
            "{}What is photosynthesis and how does it work? It is how plants feed themselves.",
            PHOTOSYNTHESIS.repeat(3)
        );
        let model = ScriptedCompletion::repeating("What is photosynthesis?", 1);
        let uc    = use_case(&model, &GeneratorConfig::default());
        let out   = uc.generate(&text, 1, DifficultyLevel::Easy);

        assert_eq!(
            out.cards,
            vec![Flashcard::new("What is photosynthesis?", NO_ANSWER_PLACEHOLDER, Difficulty::Easy)]
        );
        assert_eq!(out.error, None);
    }

    #[test]
    fn test_card_budget() {
        assert_eq!(card_budget(0, 1, 5, 0), 5);
        assert_eq!(card_budget(0, 4, 2, 0), 1);
        assert_eq!(card_budget(3, 4, 2, 9), 1);
        assert_eq!(card_budget(1, 3, 10, 3), 3);
        assert_eq!(card_budget(2, 3, 10, 3), 7);
    }

    #[test]
    fn test_planner_chunks_cleaned_text() {
        let config  = GeneratorConfig { max_chunk_tokens: 14, ..Default::default() };
        let planner = ChunkPlanner::new(&config, Box::new(WhitespaceCounter));
        let text    = format!("{}\n\n https://example.org/page", long_text(4));

        let chunks = planner.prepare(&text).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| !c.contains("https")));
    }
}
