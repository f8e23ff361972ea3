//! Protocols that look only at the words of a response, not the lexicon.

use std::collections::HashSet;

use veta_core::text::words;
use veta_core::{Matcher, Outcome, Response, ResponseProtocol, Segment, SubjectProtocol, VetaError};

use super::{combined_text, segment_id};

/// Word count of one segment of a response.
#[derive(Debug, Clone)]
pub struct Length {
    id: String,
    segment: Segment,
}

impl Length {
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        Self {
            id: segment_id("length", segment),
            segment,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::new(Segment::Both)
    }
}

impl ResponseProtocol for Length {
    fn id(&self) -> &str {
        &self.id
    }

    fn needs_lexicon(&self) -> bool {
        false
    }

    #[allow(clippy::cast_precision_loss)]
    fn execute(&self, response: &Response, _: Option<&Matcher>) -> Result<Outcome, VetaError> {
        Ok(Outcome::Number(words(response.text(self.segment)).count() as f64))
    }
}

/// Distinct words across all of a subject's responses.
#[derive(Debug, Clone)]
pub struct Vocab {
    id: String,
    segment: Segment,
}

impl Vocab {
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        Self {
            id: segment_id("vocab", segment),
            segment,
        }
    }
}

impl Default for Vocab {
    fn default() -> Self {
        Self::new(Segment::Both)
    }
}

impl SubjectProtocol for Vocab {
    fn id(&self) -> &str {
        &self.id
    }

    fn needs_lexicon(&self) -> bool {
        false
    }

    #[allow(clippy::cast_precision_loss)]
    fn execute(&self, responses: &[Response], _: Option<&Matcher>) -> Result<f64, VetaError> {
        let text = combined_text(responses, self.segment);
        let unique: HashSet<&str> = words(&text).collect();
        Ok(unique.len() as f64)
    }
}
