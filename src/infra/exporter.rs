// ============================================================
// Layer 6 - Flashcard Exporter
// ============================================================
// Serialises the final card list for study tools.
//
// Formats:
//   csv     - spreadsheet table, header row, all three fields
//               question,answer,difficulty
//               What is X?,X is Y.,Medium
//   json    - self-describing wrapper with count and tag
//               {"flashcards": [...], "total_cards": 1,
//                "generated_by": "..."}
//   anki    - two CSV columns, no header (Anki "Import File")
//   quizlet - question<TAB>answer per line, no header
//
// Rendering is separate from writing so the formats can be
// tested without touching the disk.
//
// Reference: csv crate documentation
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::{Path, PathBuf}};

use crate::domain::flashcard::Flashcard;

/// Written into JSON exports as the producer
pub const GENERATOR_TAG: &str = "Flan-T5 Flashcard Generator";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Anki,
    Quizlet,
}

impl ExportFormat {
    /// File name used when the caller doesn't choose one
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv     => "flashcards.csv",
            ExportFormat::Json    => "flashcards.json",
            ExportFormat::Anki    => "flashcards_anki.csv",
            ExportFormat::Quizlet => "flashcards_quizlet.txt",
        }
    }
}

#[derive(Serialize)]
struct JsonExport<'a> {
    flashcards:   &'a [Flashcard],
    total_cards:  usize,
    generated_by: &'a str,
}

/// Render `cards` in `format` as a string
pub fn render(cards: &[Flashcard], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv     => render_csv(cards),
        ExportFormat::Json    => render_json(cards),
        ExportFormat::Anki    => render_anki(cards),
        ExportFormat::Quizlet => Ok(render_quizlet(cards)),
    }
}

/// Render and write to `path`; returns the path written
pub fn export(cards: &[Flashcard], format: ExportFormat, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path     = path.as_ref();
    let contents = render(cards, format)?;

    fs::write(path, contents)
        .with_context(|| format!("Cannot write export to '{}'", path.display()))?;

    tracing::info!("Exported {} flashcards to '{}' ({:?})", cards.len(), path.display(), format);
    Ok(path.to_path_buf())
}

fn render_csv(cards: &[Flashcard]) -> Result<String> {
    // Header comes from the Flashcard field names
    let mut writer = csv::Writer::from_writer(Vec::new());
    for card in cards {
        writer.serialize(card)?;
    }
    finish_csv(writer, cards.is_empty())
}

fn render_anki(cards: &[Flashcard]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for card in cards {
        writer.write_record([card.question.as_str(), card.answer.as_str()])?;
    }
    finish_csv(writer, false)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>, header_only: bool) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Cannot flush CSV output: {e}"))?;
    let mut out = String::from_utf8(bytes).context("CSV output is not UTF-8")?;

    // serde-driven headers are only emitted with the first record
    if header_only {
        out.push_str("question,answer,difficulty\n");
    }
    Ok(out)
}

fn render_json(cards: &[Flashcard]) -> Result<String> {
    let export = JsonExport {
        flashcards:   cards,
        total_cards:  cards.len(),
        generated_by: GENERATOR_TAG,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

fn render_quizlet(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|c| format!("{}\t{}\n", c.question, c.answer))
        .collect()
}
