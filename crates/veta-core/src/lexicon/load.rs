//! Reading and writing lexicon files.
//!
//! Supported layouts, chosen by file extension:
//! - `.json` / `.yaml` / `.yml`: a document with optional `name`, `creator`,
//!   `language` and an `entries` list of `{phrase, score, subclass?}` rows.
//! - `.txt` / `.tsv`: one row per line, `phrase<TAB>score[<TAB>subclass]`
//!   (commas are accepted instead of tabs). Blank lines and `#` comments are skipped.
//!
//! Rows are read untyped first and checked afterwards so a malformed cell is
//! reported as [`VetaError::InvalidEntry`] with its row number, not as a
//! generic parse failure.

use std::fmt::Write as _;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::{Lexicon, LexiconEntry};
use crate::VetaError;

/// A lexicon row as it came out of a file, before type checking.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub phrase: Value,
    pub score: Value,
    #[serde(default)]
    pub subclass: Option<Value>,
}

impl RawEntry {
    #[must_use]
    pub fn new(phrase: Value, score: Value, subclass: Option<Value>) -> Self {
        Self {
            phrase,
            score,
            subclass,
        }
    }

    /// Type-check the row.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::InvalidEntry`] if the phrase is not a string or a
    /// score/subclass cell is not numeric.
    pub fn to_entry(&self) -> Result<LexiconEntry, VetaError> {
        let Value::String(phrase) = &self.phrase else {
            return Err(VetaError::InvalidEntry(format!(
                "phrase must be text, got {}",
                self.phrase
            )));
        };
        let score = numeric_cell(&self.score)
            .ok_or_else(|| VetaError::InvalidEntry(format!("score for '{phrase}' is not numeric")))?;
        let subclass = match &self.subclass {
            None | Some(Value::Null) => 0.0,
            Some(v) => numeric_cell(v).ok_or_else(|| {
                VetaError::InvalidEntry(format!("subclass for '{phrase}' is not numeric"))
            })?,
        };
        LexiconEntry::new(phrase, score, subclass)
    }
}

fn numeric_cell(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconFormat {
    Json,
    Yaml,
    Text,
}

impl LexiconFormat {
    /// Pick a format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::UnsupportedFileType`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, VetaError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "txt" | "tsv" => Ok(Self::Text),
            _ => Err(VetaError::UnsupportedFileType(path.display().to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LexiconDocument {
    name: Option<String>,
    creator: Option<String>,
    language: Option<String>,
    #[serde(default)]
    entries: Vec<RawEntry>,
}

/// Load, type-check and normalize a lexicon file.
///
/// `fallback_language` is used when the file does not name a language.
///
/// # Errors
///
/// Returns [`VetaError`] if the file cannot be read, has an unsupported
/// extension, cannot be parsed, or contains an invalid row.
pub fn load_lexicon(path: &Path, fallback_language: &str) -> Result<Lexicon, VetaError> {
    let format = LexiconFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| VetaError::LexiconFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let lexicon = parse_document(&content, format, fallback_language, &path.display().to_string())?;
    tracing::info!(
        path = %path.display(),
        entries = lexicon.len(),
        language = lexicon.language(),
        "lexicon loaded"
    );
    Ok(lexicon)
}

/// Parse lexicon content that is already in memory.
///
/// # Errors
///
/// Returns [`VetaError`] if the content cannot be parsed or contains an invalid row.
pub fn parse_lexicon(
    content: &str,
    format: LexiconFormat,
    fallback_language: &str,
) -> Result<Lexicon, VetaError> {
    parse_document(content, format, fallback_language, "<inline>")
}

fn parse_document(
    content: &str,
    format: LexiconFormat,
    fallback_language: &str,
    source: &str,
) -> Result<Lexicon, VetaError> {
    let parse_err = |reason: String| VetaError::LexiconFileParse {
        path: source.to_string(),
        reason,
    };

    let document = match format {
        LexiconFormat::Json => {
            serde_json::from_str::<LexiconDocument>(content).map_err(|e| parse_err(e.to_string()))?
        }
        LexiconFormat::Yaml => {
            serde_yaml::from_str::<LexiconDocument>(content).map_err(|e| parse_err(e.to_string()))?
        }
        LexiconFormat::Text => LexiconDocument {
            name: None,
            creator: None,
            language: None,
            entries: parse_text_rows(content).map_err(parse_err)?,
        },
    };

    let language = document.language.as_deref().unwrap_or(fallback_language);
    let mut lexicon = Lexicon::new(language).with_metadata(
        document.name.as_deref().unwrap_or("wordlist"),
        document.creator.as_deref().unwrap_or("veta"),
    );

    for (i, raw) in document.entries.iter().enumerate() {
        lexicon.add_raw_entry(raw).map_err(|e| match e {
            VetaError::InvalidEntry(reason) => {
                VetaError::InvalidEntry(format!("row {}: {reason}", i + 1))
            }
            other => other,
        })?;
    }
    lexicon.normalize();
    Ok(lexicon)
}

fn parse_text_rows(content: &str) -> Result<Vec<RawEntry>, String> {
    let mut rows = Vec::new();
    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cells: Vec<&str> = if line.contains('\t') {
            line.split('\t').map(str::trim).collect()
        } else {
            line.split(',').map(str::trim).collect()
        };
        if cells.len() < 2 || cells.len() > 3 {
            return Err(format!(
                "line {}: expected 2 or 3 columns, found {}",
                n + 1,
                cells.len()
            ));
        }
        rows.push(RawEntry::new(
            Value::String(cells[0].to_string()),
            Value::String(cells[1].to_string()),
            cells.get(2).map(|s| Value::String((*s).to_string())),
        ));
    }
    Ok(rows)
}

/// Write a lexicon to `path` in the format implied by its extension.
///
/// # Errors
///
/// Returns [`VetaError`] if the extension is unsupported, serialization fails,
/// or the file cannot be written.
pub fn save_lexicon(lexicon: &Lexicon, path: &Path) -> Result<(), VetaError> {
    let format = LexiconFormat::from_path(path)?;
    let parse_err = |reason: String| VetaError::LexiconFileParse {
        path: path.display().to_string(),
        reason,
    };

    let body = match format {
        LexiconFormat::Json => {
            serde_json::to_string_pretty(lexicon).map_err(|e| parse_err(e.to_string()))?
        }
        LexiconFormat::Yaml => serde_yaml::to_string(lexicon).map_err(|e| parse_err(e.to_string()))?,
        LexiconFormat::Text => {
            let mut out = String::new();
            for entry in lexicon.entries() {
                writeln!(out, "{}\t{}\t{}", entry.phrase, entry.score, entry.subclass)
                    .map_err(|e| parse_err(e.to_string()))?;
            }
            out
        }
    };

    std::fs::write(path, body).map_err(|e| VetaError::LexiconFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), entries = lexicon.len(), "lexicon saved");
    Ok(())
}
