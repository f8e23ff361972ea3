//! Sentiment protocols and the classifier interface they delegate to.

mod valence;

use std::collections::HashSet;
use std::sync::Arc;

use veta_core::text::words;
use veta_core::{normalize_text, require_matcher, Matcher, Outcome, Response, ResponseProtocol, VetaError};

use crate::error::SentimentError;

pub use valence::ValenceClassifier;

/// Polarity scores in order: negative, neutral, positive, compound.
pub type Polarity = [f64; 4];

/// External sentiment model consulted by [`Sentiment`].
pub trait SentimentClassifier: Send + Sync {
    /// Score one normalized sentence.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the model cannot score the sentence.
    fn classify(&self, sentence: &str) -> Result<Polarity, SentimentError>;
}

/// Stores a classifier's polarity tuple as `{id}1..{id}4`.
#[derive(Clone)]
pub struct Sentiment {
    id: String,
    classifier: Arc<dyn SentimentClassifier>,
    strip_matches: bool,
}

impl Sentiment {
    /// Classify the full answer. Stored as `sentiment-1..sentiment-4`.
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            id: "sentiment-".to_string(),
            classifier,
            strip_matches: false,
        }
    }

    /// Classify the answer with lexicon-matched words removed, so the score
    /// reflects only the words the lexicon does not cover. Stored as `vader1..vader4`.
    pub fn vader(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            id: "vader".to_string(),
            classifier,
            strip_matches: true,
        }
    }

    fn sentence(&self, response: &Response, matcher: Option<&Matcher>) -> Result<String, VetaError> {
        let text = response.full_text();
        if !self.strip_matches {
            return Ok(text.to_string());
        }
        let matches = require_matcher(matcher, self.id())?.find(text)?;
        let matched: HashSet<String> = matches.iter().map(|row| normalize_text(&row.phrase)).collect();
        Ok(words(text)
            .filter(|word| !matched.contains(*word))
            .collect::<Vec<_>>()
            .join(" "))
    }
}

impl std::fmt::Debug for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sentiment")
            .field("id", &self.id)
            .field("strip_matches", &self.strip_matches)
            .finish_non_exhaustive()
    }
}

impl ResponseProtocol for Sentiment {
    fn id(&self) -> &str {
        &self.id
    }

    fn needs_lexicon(&self) -> bool {
        self.strip_matches
    }

    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let sentence = self.sentence(response, matcher)?;
        let polarity = match self.classifier.classify(&sentence) {
            Ok(polarity) => polarity,
            Err(e) => {
                tracing::warn!(protocol = %self.id, sentence = %sentence, error = %e, "sentiment classifier failed; recording zeros");
                [0.0; 4]
            }
        };
        Ok(Outcome::Tuple(polarity.to_vec()))
    }
}
