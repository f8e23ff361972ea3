//! Built-in word-valence classifier.

use std::collections::HashMap;

use veta_core::normalize_text;
use veta_core::text::words;

use super::{Polarity, SentimentClassifier};
use crate::error::SentimentError;

/// Default word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
const VALENCE: &[(&str, f64)] = &[
    // Positive
    ("happy", 0.5),
    ("glad", 0.4),
    ("joy", 0.5),
    ("joyful", 0.5),
    ("excited", 0.4),
    ("proud", 0.4),
    ("relieved", 0.3),
    ("calm", 0.3),
    ("content", 0.3),
    ("grateful", 0.4),
    ("hopeful", 0.3),
    ("love", 0.5),
    ("loved", 0.5),
    ("pleased", 0.4),
    ("thrilled", 0.5),
    ("good", 0.3),
    ("great", 0.4),
    ("safe", 0.3),
    ("amused", 0.3),
    ("confident", 0.3),
    // Negative
    ("sad", -0.4),
    ("angry", -0.5),
    ("afraid", -0.5),
    ("scared", -0.5),
    ("anxious", -0.4),
    ("worried", -0.4),
    ("upset", -0.4),
    ("hurt", -0.4),
    ("lonely", -0.4),
    ("ashamed", -0.5),
    ("guilty", -0.4),
    ("jealous", -0.3),
    ("annoyed", -0.3),
    ("frustrated", -0.4),
    ("disappointed", -0.4),
    ("embarrassed", -0.3),
    ("hate", -0.6),
    ("terrible", -0.6),
    ("bad", -0.3),
    ("miserable", -0.6),
];

/// Sums word weights into a clamped compound score and splits the sentence
/// into negative, neutral and positive proportions.
#[derive(Debug, Clone)]
pub struct ValenceClassifier {
    weights: HashMap<String, f64>,
}

impl ValenceClassifier {
    /// Classifier over a custom weight table.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidWeight`] for weights outside `[-1, 1]`.
    pub fn from_weights<I, S>(weights: I) -> Result<Self, SentimentError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = HashMap::new();
        for (word, weight) in weights {
            let word = word.into();
            if !(-1.0..=1.0).contains(&weight) {
                return Err(SentimentError::InvalidWeight { word, weight });
            }
            table.insert(normalize_text(&word), weight);
        }
        Ok(Self { weights: table })
    }
}

impl Default for ValenceClassifier {
    fn default() -> Self {
        Self {
            weights: VALENCE
                .iter()
                .map(|&(word, weight)| (word.to_string(), weight))
                .collect(),
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

impl SentimentClassifier for ValenceClassifier {
    #[allow(clippy::float_cmp)]
    fn classify(&self, sentence: &str) -> Result<Polarity, SentimentError> {
        let text = normalize_text(sentence);
        let (mut positive, mut negative, mut neutral, mut compound) = (0.0, 0.0, 0.0, 0.0);

        for word in words(&text) {
            match self.weights.get(word) {
                Some(&w) if w > 0.0 => positive += w,
                Some(&w) if w < 0.0 => negative += -w,
                _ => neutral += 1.0,
            }
            compound += self.weights.get(word).copied().unwrap_or(0.0);
        }

        let total = positive + negative + neutral;
        if total == 0.0 {
            return Ok([0.0; 4]);
        }
        Ok([
            round3(negative / total),
            round3(neutral / total),
            round3(positive / total),
            round3(compound.clamp(-1.0, 1.0)),
        ])
    }
}
