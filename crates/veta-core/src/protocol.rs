//! The seam between the response model and the scoring algorithms.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matcher::Matcher;
use crate::response::Response;
use crate::VetaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    PerResponse,
    PerSubject,
}

/// Which part of an answer a protocol reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// The text about the respondent.
    #[serde(rename = "self")]
    SelfOnly,
    /// The text about the other person.
    #[serde(rename = "other")]
    OtherOnly,
    #[default]
    #[serde(rename = "both")]
    Both,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::SelfOnly => write!(f, "self"),
            Segment::OtherOnly => write!(f, "other"),
            Segment::Both => write!(f, "both"),
        }
    }
}

/// What a protocol produced for one response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Number(f64),
    Flag(bool),
    /// Fixed-length values stored as `id1`, `id2`, ...
    Tuple(Vec<f64>),
}

/// A value stored in a response's score map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Number(f64),
    Flag(bool),
}

impl ScoreValue {
    /// Numeric view used when summing totals; flags count as 0 or 1.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            ScoreValue::Number(n) => n,
            ScoreValue::Flag(b) => f64::from(u8::from(b)),
        }
    }
}

impl std::fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreValue::Number(n) => write!(f, "{n}"),
            ScoreValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// A scoring algorithm applied to one response at a time.
pub trait ResponseProtocol: Send + Sync {
    fn id(&self) -> &str;

    /// Whether [`execute`](Self::execute) needs a matcher. Defaults to `true`.
    fn needs_lexicon(&self) -> bool {
        true
    }

    /// Score one response. `matcher` is `Some` whenever [`needs_lexicon`](Self::needs_lexicon) is true.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError`] if matching fails.
    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError>;
}

/// A scoring algorithm applied once to a subject's whole answer set.
pub trait SubjectProtocol: Send + Sync {
    fn id(&self) -> &str;

    fn needs_lexicon(&self) -> bool {
        true
    }

    /// Score all of a subject's responses together.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError`] if matching fails.
    fn execute(&self, responses: &[Response], matcher: Option<&Matcher>) -> Result<f64, VetaError>;
}

#[derive(Clone)]
pub enum Protocol {
    PerResponse(Arc<dyn ResponseProtocol>),
    PerSubject(Arc<dyn SubjectProtocol>),
}

impl Protocol {
    pub fn per_response<P: ResponseProtocol + 'static>(protocol: P) -> Self {
        Protocol::PerResponse(Arc::new(protocol))
    }

    pub fn per_subject<P: SubjectProtocol + 'static>(protocol: P) -> Self {
        Protocol::PerSubject(Arc::new(protocol))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Protocol::PerResponse(p) => p.id(),
            Protocol::PerSubject(p) => p.id(),
        }
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        match self {
            Protocol::PerResponse(_) => Scope::PerResponse,
            Protocol::PerSubject(_) => Scope::PerSubject,
        }
    }

    #[must_use]
    pub fn needs_lexicon(&self) -> bool {
        match self {
            Protocol::PerResponse(p) => p.needs_lexicon(),
            Protocol::PerSubject(p) => p.needs_lexicon(),
        }
    }
}

impl std::fmt::Debug for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Protocol")
            .field("id", &self.id())
            .field("scope", &self.scope())
            .finish()
    }
}

/// Unwrap the matcher handed to a protocol that needs one.
///
/// # Errors
///
/// Returns [`VetaError::MissingLexicon`] naming `protocol_id` if `matcher` is `None`.
pub fn require_matcher<'m>(
    matcher: Option<&'m Matcher>,
    protocol_id: &str,
) -> Result<&'m Matcher, VetaError> {
    matcher.ok_or_else(|| VetaError::MissingLexicon(protocol_id.to_string()))
}
