//! Weighted vocabulary of emotion words and phrases.
//!
//! A [`Lexicon`] is an ordered set of `(phrase, score, subclass)` rows plus an
//! opaque identity token. Every mutation regenerates the identity so that a
//! [`Matcher`](crate::Matcher) holding a compiled index can tell its cache is
//! stale.

mod load;

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::VetaError;

pub use load::{load_lexicon, parse_lexicon, save_lexicon, LexiconFormat, RawEntry};

/// One row of a lexicon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexiconEntry {
    pub phrase: String,
    pub score: f64,
    pub subclass: f64,
}

impl LexiconEntry {
    /// Build an entry, rejecting non-finite numbers.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::InvalidEntry`] if `score` or `subclass` is NaN or infinite.
    pub fn new(phrase: &str, score: f64, subclass: f64) -> Result<Self, VetaError> {
        if !score.is_finite() {
            return Err(VetaError::InvalidEntry(format!(
                "score for '{phrase}' is not a finite number"
            )));
        }
        if !subclass.is_finite() {
            return Err(VetaError::InvalidEntry(format!(
                "subclass for '{phrase}' is not a finite number"
            )));
        }
        Ok(Self {
            phrase: phrase.to_string(),
            score,
            subclass,
        })
    }

    #[allow(clippy::float_cmp)]
    fn is_blank(&self) -> bool {
        self.score == 0.0 && self.subclass == 0.0
    }
}

fn default_name() -> String {
    "wordlist".to_string()
}

fn default_creator() -> String {
    "veta".to_string()
}

/// Serialized through [`save_lexicon`]; reading goes through [`parse_lexicon`].
#[derive(Debug, Clone, Serialize)]
pub struct Lexicon {
    name: String,
    creator: String,
    language: String,
    entries: Vec<LexiconEntry>,
    #[serde(skip)]
    identity: Uuid,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Lexicon {
    /// Create an empty lexicon whose boundary rules follow `language`.
    #[must_use]
    pub fn new(language: &str) -> Self {
        Self {
            name: default_name(),
            creator: default_creator(),
            language: language.trim().to_lowercase(),
            entries: Vec::new(),
            identity: Uuid::new_v4(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, name: &str, creator: &str) -> Self {
        self.name = name.to_string();
        self.creator = creator.to_string();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn creator(&self) -> &str {
        &self.creator
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Change the language tag. Boundary rules depend on it, so the identity changes too.
    pub fn set_language(&mut self, language: &str) {
        let language = language.trim().to_lowercase();
        if language != self.language {
            self.language = language;
            self.touch();
        }
    }

    /// Token that changes whenever the entry set (or language) changes.
    #[must_use]
    pub fn identity(&self) -> Uuid {
        self.identity
    }

    #[must_use]
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by phrase, ignoring case.
    #[must_use]
    pub fn get(&self, phrase: &str) -> Option<&LexiconEntry> {
        let needle = phrase.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.phrase.trim().to_lowercase() == needle)
    }

    /// Append one entry.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::InvalidEntry`] if `score` or `subclass` is not a finite number.
    pub fn add_entry(&mut self, phrase: &str, score: f64, subclass: f64) -> Result<(), VetaError> {
        let entry = LexiconEntry::new(phrase, score, subclass)?;
        self.entries.push(entry);
        self.touch();
        Ok(())
    }

    /// Append a row read from an external source, type-checking every cell first.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::InvalidEntry`] if the phrase is not text or the
    /// score/subclass are not numeric.
    pub fn add_raw_entry(&mut self, raw: &RawEntry) -> Result<(), VetaError> {
        let entry = raw.to_entry()?;
        self.entries.push(entry);
        self.touch();
        Ok(())
    }

    /// Append parallel sequences of phrases, scores and optional subclasses.
    ///
    /// Subclasses default to `0` when `subclasses` is `None`. Nothing is added
    /// unless every row is valid.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::InvalidEntry`] if the sequence lengths differ or any row is invalid.
    pub fn add_entries(
        &mut self,
        phrases: &[&str],
        scores: &[f64],
        subclasses: Option<&[f64]>,
    ) -> Result<(), VetaError> {
        if phrases.len() != scores.len() {
            return Err(VetaError::InvalidEntry(format!(
                "{} phrases but {} scores",
                phrases.len(),
                scores.len()
            )));
        }
        if let Some(subs) = subclasses {
            if subs.len() != phrases.len() {
                return Err(VetaError::InvalidEntry(format!(
                    "{} phrases but {} subclasses",
                    phrases.len(),
                    subs.len()
                )));
            }
        }

        let mut batch = Vec::with_capacity(phrases.len());
        for (i, (phrase, score)) in phrases.iter().zip(scores).enumerate() {
            let subclass = subclasses.map_or(0.0, |s| s[i]);
            batch.push(LexiconEntry::new(phrase, *score, subclass)?);
        }
        self.entries.extend(batch);
        self.touch();
        Ok(())
    }

    /// Remove every entry whose phrase matches `phrase` (case-insensitive).
    ///
    /// Returns `false` and logs a warning if nothing matched.
    pub fn remove_entry(&mut self, phrase: &str) -> bool {
        let needle = phrase.trim().to_lowercase();
        let before = self.entries.len();
        self.entries
            .retain(|e| e.phrase.trim().to_lowercase() != needle);

        if self.entries.len() == before {
            tracing::warn!(phrase, lexicon = %self.name, "phrase not in lexicon; nothing removed");
            return false;
        }
        self.touch();
        true
    }

    /// Lowercase phrases, drop zero/zero rows and duplicates (first wins), sort by phrase.
    ///
    /// The identity is regenerated only when the entry set actually changed.
    pub fn normalize(&mut self) {
        let mut seen = HashSet::new();
        let mut normalized: Vec<LexiconEntry> = self
            .entries
            .iter()
            .filter(|e| !e.is_blank())
            .map(|e| LexiconEntry {
                phrase: e.phrase.trim().to_lowercase(),
                score: e.score,
                subclass: e.subclass,
            })
            .filter(|e| seen.insert(e.phrase.clone()))
            .collect();
        normalized.sort_by(|a, b| a.phrase.cmp(&b.phrase));

        if normalized != self.entries {
            tracing::debug!(
                lexicon = %self.name,
                before = self.entries.len(),
                after = normalized.len(),
                "lexicon normalized"
            );
            self.entries = normalized;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.identity = Uuid::new_v4();
    }
}

impl std::fmt::Display for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            let pad = 20usize.saturating_sub(entry.phrase.chars().count());
            writeln!(f, "{}:{}{}", entry.phrase, " ".repeat(pad), entry.score)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "lexicon_test.rs"]
mod tests;
