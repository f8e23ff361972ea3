//! A single survey answer and the scores assigned to it.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::matcher::Matcher;
use crate::protocol::{Outcome, Protocol, ResponseProtocol, ScoreValue, Segment};
use crate::text::{join_segments, normalize_text};
use crate::VetaError;

#[derive(Debug, Clone)]
pub struct Response {
    /// 1-based position within the owning subject; 0 until added to one.
    index: usize,
    self_text: String,
    other_text: String,
    full_text: String,
    raw_text: String,
    scores: BTreeMap<String, ScoreValue>,
    matcher: Option<Arc<Matcher>>,
}

impl Response {
    /// Build a response from the text about the respondent and the text about the other person.
    #[must_use]
    pub fn new(self_text: &str, other_text: &str) -> Self {
        let self_norm = normalize_text(self_text);
        let other_norm = normalize_text(other_text);
        Self {
            index: 0,
            full_text: join_segments(&self_norm, &other_norm),
            self_text: self_norm,
            other_text: other_norm,
            raw_text: format!("{self_text}. {other_text}"),
            scores: BTreeMap::new(),
            matcher: None,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    #[must_use]
    pub fn self_text(&self) -> &str {
        &self.self_text
    }

    #[must_use]
    pub fn other_text(&self) -> &str {
        &self.other_text
    }

    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Normalized text for one segment.
    #[must_use]
    pub fn text(&self, segment: Segment) -> &str {
        match segment {
            Segment::SelfOnly => &self.self_text,
            Segment::OtherOnly => &self.other_text,
            Segment::Both => &self.full_text,
        }
    }

    pub fn attach_matcher(&mut self, matcher: Arc<Matcher>) {
        self.matcher = Some(matcher);
    }

    #[must_use]
    pub fn matcher(&self) -> Option<&Matcher> {
        self.matcher.as_deref()
    }

    #[must_use]
    pub fn scores(&self) -> &BTreeMap<String, ScoreValue> {
        &self.scores
    }

    #[must_use]
    pub fn score_of(&self, id: &str) -> Option<ScoreValue> {
        self.scores.get(id).copied()
    }

    /// Store a value that did not come from a protocol (e.g. a rater's manual score).
    pub fn add_additional_info(&mut self, id: &str, value: f64) {
        self.scores.insert(id.to_string(), ScoreValue::Number(value));
    }

    pub(crate) fn set_score(&mut self, id: &str, value: ScoreValue) {
        self.scores.insert(id.to_string(), value);
    }

    /// Apply one protocol and record its result, overwriting any earlier value.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::UnsupportedProtocolSignature`] for per-subject
    /// protocols, [`VetaError::MissingLexicon`] if the protocol needs a
    /// matcher and none is attached, or any error raised while matching.
    pub fn score(&mut self, protocol: &Protocol) -> Result<(), VetaError> {
        match protocol {
            Protocol::PerResponse(p) => self.score_with(p.as_ref()),
            Protocol::PerSubject(p) => Err(VetaError::UnsupportedProtocolSignature {
                id: p.id().to_string(),
                reason: "on a single response; it needs the subject's full response set".to_string(),
            }),
        }
    }

    /// Apply a per-response protocol directly.
    ///
    /// # Errors
    ///
    /// See [`Response::score`].
    pub fn score_with(&mut self, protocol: &dyn ResponseProtocol) -> Result<(), VetaError> {
        let id = protocol.id();
        let outcome = if protocol.needs_lexicon() {
            let Some(matcher) = self.matcher.as_deref() else {
                return Err(VetaError::MissingLexicon(id.to_string()));
            };
            protocol.execute(self, Some(matcher))?
        } else {
            protocol.execute(self, None)?
        };

        match outcome {
            Outcome::Number(n) => self.set_score(id, ScoreValue::Number(n)),
            Outcome::Flag(b) => self.set_score(id, ScoreValue::Flag(b)),
            Outcome::Tuple(values) => {
                for (i, v) in values.into_iter().enumerate() {
                    self.set_score(&format!("{id}{}", i + 1), ScoreValue::Number(v));
                }
            }
        }
        tracing::debug!(protocol = id, index = self.index, "response scored");
        Ok(())
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Self: {}", self.self_text)?;
        writeln!(f, "Other: {}", self.other_text)?;
        for (id, value) in &self.scores {
            writeln!(f, "{id}: {value}")?;
        }
        Ok(())
    }
}
