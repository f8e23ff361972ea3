//! Lexicon phrase matching with word-boundary semantics.
//!
//! A [`Matcher`] owns a [`Lexicon`] and lazily compiles it into a character
//! trie. The compiled index is cached per matcher and rebuilt only when the
//! lexicon's identity token changes.

mod boundary;
mod trie;

use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::lexicon::Lexicon;
use crate::text::normalize_text;
use crate::VetaError;

pub use boundary::{is_phrase_char, BoundaryRules};
use trie::{Occurrence, PhraseTrie};

/// One lexicon entry found in a text.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub phrase: String,
    pub score: f64,
    pub subclass: f64,
    /// Accepted occurrences; always at least 1.
    pub frequency: usize,
}

/// Entries found in one text, in lexicon order. Empty when nothing matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    rows: Vec<MatchRow>,
}

impl MatchResult {
    #[must_use]
    pub fn rows(&self) -> &[MatchRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRow> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn frequencies(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.frequency).collect()
    }

    #[must_use]
    pub fn phrases(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.phrase.as_str()).collect()
    }

    #[must_use]
    pub fn scores(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.score).collect()
    }

    #[must_use]
    pub fn total_frequency(&self) -> usize {
        self.rows.iter().map(|r| r.frequency).sum()
    }
}

impl<'a> IntoIterator for &'a MatchResult {
    type Item = &'a MatchRow;
    type IntoIter = std::slice::Iter<'a, MatchRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Debug)]
struct CompiledIndex {
    identity: Uuid,
    trie: PhraseTrie,
    rules: BoundaryRules,
}

#[derive(Debug)]
pub struct Matcher {
    lexicon: Lexicon,
    rules_override: Option<BoundaryRules>,
    cache: Mutex<Option<Arc<CompiledIndex>>>,
}

impl Matcher {
    /// Boundary rules follow the lexicon's language tag.
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            rules_override: None,
            cache: Mutex::new(None),
        }
    }

    /// Use explicit boundary rules instead of the language defaults.
    #[must_use]
    pub fn with_boundary_rules(lexicon: Lexicon, rules: BoundaryRules) -> Self {
        Self {
            lexicon,
            rules_override: Some(rules),
            cache: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Mutable access; the next scan recompiles if the lexicon identity changes.
    pub fn lexicon_mut(&mut self) -> &mut Lexicon {
        &mut self.lexicon
    }

    /// Identity of the lexicon the cached index was built from, if any.
    #[must_use]
    pub fn compiled_identity(&self) -> Option<Uuid> {
        self.lock_cache().as_ref().map(|c| c.identity)
    }

    /// Compile now instead of on the first scan.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::InvalidInput`] if a lexicon phrase is empty.
    pub fn compile(&self) -> Result<(), VetaError> {
        self.index().map(|_| ())
    }

    /// Find every lexicon entry in `text`.
    ///
    /// The text is normalized the same way survey answers are before scanning.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::InvalidInput`] if the lexicon contains an empty phrase.
    pub fn find(&self, text: &str) -> Result<MatchResult, VetaError> {
        let index = self.index()?;
        let chars: Vec<char> = normalize_text(text).chars().collect();
        let occurrences = index.trie.scan(&chars, &index.rules);
        let counts = count_occurrences(&occurrences, &chars, &index.rules, self.lexicon.len());

        let rows = self
            .lexicon
            .entries()
            .iter()
            .zip(counts)
            .filter(|(_, n)| *n > 0)
            .map(|(entry, frequency)| MatchRow {
                phrase: entry.phrase.clone(),
                score: entry.score,
                subclass: entry.subclass,
                frequency,
            })
            .collect();
        Ok(MatchResult { rows })
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<Arc<CompiledIndex>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn index(&self) -> Result<Arc<CompiledIndex>, VetaError> {
        let mut cache = self.lock_cache();
        let identity = self.lexicon.identity();
        if let Some(index) = cache.as_ref().filter(|c| c.identity == identity) {
            return Ok(Arc::clone(index));
        }

        let mut phrases = Vec::with_capacity(self.lexicon.len());
        for (i, entry) in self.lexicon.entries().iter().enumerate() {
            let key = normalize_text(&entry.phrase);
            if key.is_empty() {
                return Err(VetaError::InvalidInput(format!(
                    "lexicon entry {} has an empty phrase",
                    i + 1
                )));
            }
            phrases.push((key.chars().collect::<Vec<char>>(), i));
        }

        let rules = self
            .rules_override
            .clone()
            .unwrap_or_else(|| BoundaryRules::for_language(self.lexicon.language()));
        let index = Arc::new(CompiledIndex {
            identity,
            trie: PhraseTrie::build(&phrases),
            rules,
        });
        tracing::debug!(
            lexicon = self.lexicon.name(),
            entries = phrases.len(),
            %identity,
            "compiled lexicon index"
        );
        *cache = Some(Arc::clone(&index));
        Ok(index)
    }
}

/// Tally occurrences per entry, applying the adjacency correction for unsegmented scripts.
///
/// An occurrence that starts exactly where the previous one ended, and is
/// followed by a phrase character, is probably part of an unlisted longer
/// word and does not count.
fn count_occurrences(
    occurrences: &[Occurrence],
    text: &[char],
    rules: &BoundaryRules,
    entry_count: usize,
) -> Vec<usize> {
    let mut counts = vec![0usize; entry_count];
    let mut previous_end = None;
    for occ in occurrences {
        counts[occ.entry] += 1;
        if rules.is_unsegmented() && previous_end == Some(occ.start) {
            let followed_by_word = text.get(occ.end).is_some_and(|&c| is_phrase_char(c));
            if followed_by_word {
                counts[occ.entry] -= 1;
            }
        }
        previous_end = Some(occ.end);
    }
    counts
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
