// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the subcommands and their flags:
//
//   generate    - text in, exported flashcards out
//   preview     - dry run: show chunks, budgets and prompts
//   init-config - write a default config file to edit
//
// Value enums here mirror the domain enums so that the lower
// layers never see clap types.
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::config::AppConfig;
use crate::domain::flashcard::DifficultyLevel;
use crate::infra::config_store::ConfigStore;
use crate::infra::exporter::ExportFormat;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate flashcards from a text, Markdown or .docx file (or a folder of them)
    Generate(GenerateArgs),

    /// Show how the input would be chunked and prompted, without calling the model
    Preview(PreviewArgs),

    /// Write a default configuration file
    InitConfig(InitConfigArgs),
}

// ─── Value enums ──────────────────────────────────────────────────────────────
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    /// Keep each card's own difficulty
    Mixed,
}

impl From<DifficultyArg> for DifficultyLevel {
    fn from(d: DifficultyArg) -> Self {
        match d {
            DifficultyArg::Easy   => DifficultyLevel::Easy,
            DifficultyArg::Medium => DifficultyLevel::Medium,
            DifficultyArg::Hard   => DifficultyLevel::Hard,
            DifficultyArg::Mixed  => DifficultyLevel::Mixed,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// Spreadsheet CSV with a header row
    Csv,
    /// JSON with card count and generator tag
    Json,
    /// Two-column CSV for Anki import
    Anki,
    /// Tab-separated lines for Quizlet import
    Quizlet,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv     => ExportFormat::Csv,
            FormatArg::Json    => ExportFormat::Json,
            FormatArg::Anki    => ExportFormat::Anki,
            FormatArg::Quizlet => ExportFormat::Quizlet,
        }
    }
}

// ─── Shared settings ──────────────────────────────────────────────────────────
/// Flags that override the config file
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// JSON config file (see `init-config`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the text-generation server
    #[arg(long)]
    pub endpoint: Option<String>,

    /// HuggingFace tokenizer.json used to measure chunk sizes
    #[arg(long)]
    pub tokenizer: Option<String>,

    /// Token budget per chunk
    #[arg(long)]
    pub max_chunk_tokens: Option<usize>,
}

impl SettingsArgs {
    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut cfg = match &self.config {
            Some(path) => ConfigStore::new(path).load()?,
            None       => AppConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            cfg.model.endpoint = endpoint.clone();
        }
        if let Some(tokenizer) = &self.tokenizer {
            cfg.model.tokenizer_path = Some(tokenizer.clone());
        }
        if let Some(max) = self.max_chunk_tokens {
            cfg.generator.max_chunk_tokens = max;
        }

        cfg.generator.validate()?;
        Ok(cfg)
    }
}

// ─── Per-command arguments ────────────────────────────────────────────────────
/// All arguments for the `generate` command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Input file (.txt, .md, .docx) or a directory of them
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output file; defaults to a name matching the format
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Number of flashcards to generate
    #[arg(long, short = 'n', default_value_t = 20,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub num_cards: u32,

    /// Difficulty level
    #[arg(long, short, value_enum, default_value_t = DifficultyArg::Mixed)]
    pub difficulty: DifficultyArg,

    /// Export format
    #[arg(long, short, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// All arguments for the `preview` command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Input file (.txt, .md, .docx) or a directory of them
    #[arg(long, short)]
    pub input: PathBuf,

    /// Number of flashcards the run would ask for
    #[arg(long, short = 'n', default_value_t = 20,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub num_cards: u32,

    /// Print the full prompt for every chunk
    #[arg(long)]
    pub show_prompts: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// All arguments for the `init-config` command
#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Where to write the config file
    #[arg(long, default_value = "flashcard-gen.json")]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["flashcard-gen", "generate", "--input", "notes.txt"]).unwrap();
        let Commands::Generate(args) = cli.command else { panic!("expected generate") };
        assert_eq!(args.num_cards, 20);
        assert_eq!(args.difficulty, DifficultyArg::Mixed);
        assert_eq!(args.format, FormatArg::Csv);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_rejects_zero_cards() {
        let parsed = Cli::try_parse_from(["flashcard-gen", "generate", "-i", "notes.txt", "-n", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_overrides_apply_over_defaults() {
        let settings = SettingsArgs {
            endpoint:         Some("http://gpu-box:8080".into()),
            max_chunk_tokens: Some(250),
            ..Default::default()
        };
        let cfg = settings.resolve().unwrap();
        assert_eq!(cfg.model.endpoint, "http://gpu-box:8080");
        assert_eq!(cfg.generator.max_chunk_tokens, 250);
        assert_eq!(cfg.model.tokenizer_path, None);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let settings = SettingsArgs { max_chunk_tokens: Some(0), ..Default::default() };
        assert!(settings.resolve().is_err());
    }
}
