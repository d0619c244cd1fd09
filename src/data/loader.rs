// ============================================================
// Layer 4 - Input Loader
// ============================================================
// Loads study material from disk.
//
// Accepted inputs:
//   - A single file: .txt, .md or .docx
//   - A directory: every supported file directly inside it,
//     in filename order
//
// How .docx files work:
//   A .docx file is a ZIP archive of XML parts. docx-rs parses
//   it into a typed tree:
//     Document
//       └── children: Vec<DocumentChild>
//             └── Paragraph
//                   └── children: Vec<ParagraphChild>
//                         └── Run
//                               └── children: Vec<RunChild>
//                                     └── Text (the actual words!)
//
// We walk this tree collecting all Text nodes, one line per
// paragraph.
//
// Reference: docx-rs crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::{fs, path::{Path, PathBuf}};
use docx_rs::{read_docx, ReaderError};

use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

/// File extensions the loader knows how to read
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "docx"];

/// Loads a file, or all supported files in a directory.
/// Implements the DocumentSource trait from Layer 3.
pub struct InputLoader {
    path: PathBuf,
}

impl InputLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for InputLoader {
    fn load_all(&self) -> Result<Vec<Document>> {
        if !self.path.exists() {
            bail!("Input '{}' does not exist", self.path.display());
        }

        // A single file is loaded strictly: any error is the caller's problem
        if self.path.is_file() {
            return Ok(vec![load_single_file(&self.path)?]);
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.path)
            .with_context(|| format!("Cannot read directory '{}'", self.path.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut docs = Vec::new();
        for path in paths {
            if !is_supported(&path) {
                tracing::warn!("Skipping unsupported file '{}'", path.display());
                continue;
            }

            match load_single_file(&path) {
                Ok(doc) => {
                    tracing::debug!("Loaded: {} ({} chars)", doc.source, doc.text.len());
                    docs.push(doc);
                }
                // Log a warning but continue, one bad file shouldn't sink the rest
                Err(e) => tracing::warn!("Skipping '{}': {}", path.display(), e),
            }
        }

        tracing::info!("Loaded {} documents from '{}'", docs.len(), self.path.display());
        Ok(docs)
    }
}

/// Join every document into one source text, separated by blank lines
pub fn combine(docs: &[Document]) -> String {
    docs.iter()
        .map(|d| d.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn is_supported(path: &Path) -> bool {
    extension(path).map_or(false, |e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

fn load_single_file(path: &Path) -> Result<Document> {
    let source = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let text = match extension(path).as_deref() {
        Some("docx") => load_docx_text(path)?,
        _ => fs::read_to_string(path)
            .with_context(|| format!("Cannot read '{}' as UTF-8 text", path.display()))?,
    };

    Ok(Document::new(source, text))
}

/// Parse a .docx file and return its paragraph text, one
/// paragraph per line.
fn load_docx_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;

    let docx = read_docx(&bytes)
        .map_err(|e: ReaderError| {
            anyhow::anyhow!("docx-rs parse error in '{}': {:?}", path.display(), e)
        })?;

    let mut paragraphs: Vec<String> = Vec::new();

    for child in &docx.document.children {
        use docx_rs::DocumentChild;

        // Tables and images carry nothing worth quizzing on
        if let DocumentChild::Paragraph(para) = child {
            let para_text = extract_paragraph_text(para);
            if !para_text.trim().is_empty() {
                paragraphs.push(para_text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Paragraph → Run → Text. Runs are concatenated with no
/// separator because they are parts of the same sentence.
fn extract_paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut parts = Vec::new();

    for child in &para.children {
        use docx_rs::ParagraphChild;

        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                use docx_rs::RunChild;

                if let RunChild::Text(t) = rc {
                    parts.push(t.text.clone());
                }
            }
        }
    }

    parts.join("")
}
