// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, wires the concrete collaborators (HTTP model, tokenizer,
// loader) into the use case, and prints the outcome.
// All pipeline logic is delegated to Layer 2.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, GenerateArgs, InitConfigArgs, PreviewArgs};
use std::path::{Path, PathBuf};

use crate::application::config::AppConfig;
use crate::application::generate_use_case::{card_budget, ChunkPlanner, GenerateUseCase};
use crate::data::loader::{combine, InputLoader};
use crate::domain::error::GenerationError;
use crate::domain::traits::DocumentSource;
use crate::infra::{config_store::ConfigStore, exporter, exporter::ExportFormat, tokenizer_store::token_counter};
use crate::ml::completion::{HttpCompletionService, ModelFlashcardSource};
use crate::ml::prompt::PromptBuilder;

/// Cards shown after a successful run
const PREVIEW_CARDS: usize = 3;

#[derive(Parser, Debug)]
#[command(
    name = "flashcard-gen",
    version,
    about = "Generate question/answer flashcards from study text with a seq2seq model."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch. The CLI only
    /// routes and prints, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(args)   => run_generate(args),
            Commands::Preview(args)    => run_preview(args),
            Commands::InitConfig(args) => run_init_config(args),
        }
    }
}

/// Read every input document and join them into one text
fn load_text(input: &Path) -> Result<String> {
    let docs = InputLoader::new(input).load_all()?;
    for doc in &docs {
        tracing::debug!("{}: {} chars", doc.source, doc.char_len());
    }
    Ok(combine(&docs))
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let cfg       = args.settings.resolve()?;
    let text      = load_text(&args.input)?;
    let num_cards = args.num_cards as usize;

    // ── Wire the collaborators ────────────────────────────────────────────────
    let counter    = token_counter(cfg.model.tokenizer_path.as_deref())?;
    let completion = HttpCompletionService::new(&cfg.model)?;
    let source     = ModelFlashcardSource::new(completion, cfg.generator.max_output_tokens);
    let use_case   = GenerateUseCase::new(&cfg.generator, source, counter);

    println!("Generating {num_cards} flashcards using {}...", cfg.model.endpoint);
    let generation = use_case.generate(&text, num_cards, args.difficulty.into());

    if let Some(reason) = generation.error {
        println!("No flashcards generated. {reason}");
        if let GenerationError::InputTooShort { actual, .. } = reason {
            println!("The input has {actual} characters.");
        }
        return Ok(());
    }

    // ── Export ────────────────────────────────────────────────────────────────
    let format: ExportFormat = args.format.into();
    let output  = args.output.unwrap_or_else(|| PathBuf::from(format.default_file_name()));
    let written = exporter::export(&generation.cards, format, &output)?;

    println!("Generated {} flashcards", generation.cards.len());
    println!("Exported to: {}", written.display());

    println!("\nPreview:");
    for (i, card) in generation.cards.iter().take(PREVIEW_CARDS).enumerate() {
        println!("\nCard {} [{}]:", i + 1, card.difficulty);
        println!("Q: {}", card.question);
        println!("A: {}", card.answer);
    }
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    let cfg       = args.settings.resolve()?;
    let text      = load_text(&args.input)?;
    let num_cards = args.num_cards as usize;

    let counter = token_counter(cfg.model.tokenizer_path.as_deref())?;
    let planner = ChunkPlanner::new(&cfg.generator, counter);
    let chunks  = planner.prepare(&text)?;
    let prompts = PromptBuilder::new();

    println!(
        "{} chunk(s), budget {} tokens each, {num_cards} cards requested",
        chunks.len(),
        cfg.generator.max_chunk_tokens
    );

    // Budgets assume every chunk yields exactly what it asks for
    let mut planned = 0usize;
    for (i, chunk) in chunks.iter().enumerate() {
        let budget = card_budget(i, chunks.len(), num_cards, planned);
        planned += budget;

        println!("\n── Chunk {} ({} chars, {budget} cards) ──", i + 1, chunk.chars().count());
        if args.show_prompts {
            println!("{}", prompts.build(chunk, budget));
        } else {
            println!("{chunk}");
        }
    }
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<()> {
    let store = ConfigStore::new(args.path);
    store.save(&AppConfig::default())?;
    println!("Wrote default config to {}", store.path().display());
    Ok(())
}
