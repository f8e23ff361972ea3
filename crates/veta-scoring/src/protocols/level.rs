//! The level protocols: 334, its two-segment escalations and their
//! continuous transforms.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use veta_core::{
    require_matcher, MatchResult, Matcher, Outcome, Response, ResponseProtocol, Segment, VetaError,
};

use super::{segment_id, HIGH_SCORE};

/// Max matched score, forced to 4 when two or more distinct entries score 3.
/// 0 when nothing matched.
#[allow(clippy::float_cmp)]
pub(crate) fn level_of(matches: &MatchResult) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }
    if matches.iter().filter(|row| row.score == 3.0).count() > 1 {
        return 4.0;
    }
    matches
        .iter()
        .map(|row| row.score)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// When a 3345 result escalates to 5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Escalation {
    /// Both the self and the other segment reach level 4.
    #[default]
    BothSegments,
    /// The other segment alone reaches level 4. Reproduces historical scores.
    OtherSegmentOnly,
}

#[derive(Debug, Clone)]
pub struct ThreeThreeFour {
    id: String,
    segment: Segment,
}

impl ThreeThreeFour {
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        Self {
            id: segment_id("334", segment),
            segment,
        }
    }
}

impl Default for ThreeThreeFour {
    fn default() -> Self {
        Self::new(Segment::Both)
    }
}

impl ResponseProtocol for ThreeThreeFour {
    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matches = require_matcher(matcher, self.id())?.find(response.text(self.segment))?;
        Ok(Outcome::Number(level_of(&matches)))
    }
}

/// 334 per segment, combined by max with escalation to 5.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeThreeFourFive {
    escalation: Escalation,
}

impl ThreeThreeFourFive {
    #[must_use]
    pub fn new(escalation: Escalation) -> Self {
        Self { escalation }
    }

    #[allow(clippy::float_cmp)]
    pub(crate) fn level(self, response: &Response, matcher: &Matcher) -> Result<f64, VetaError> {
        let own = level_of(&matcher.find(response.self_text())?);
        let other = level_of(&matcher.find(response.other_text())?);
        let escalate = match self.escalation {
            Escalation::BothSegments => own == 4.0 && other == 4.0,
            Escalation::OtherSegmentOnly => other == 4.0,
        };
        Ok(if escalate { 5.0 } else { own.max(other) })
    }
}

impl ResponseProtocol for ThreeThreeFourFive {
    fn id(&self) -> &str {
        "3345"
    }

    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matcher = require_matcher(matcher, self.id())?;
        Ok(Outcome::Number(self.level(response, matcher)?))
    }
}

/// 3345 that escalates only when the two segments use different high phrases.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeThreeFourFivePlus;

fn high_phrases(matches: &MatchResult) -> BTreeSet<&str> {
    matches
        .iter()
        .filter(|row| row.score > HIGH_SCORE)
        .map(|row| row.phrase.as_str())
        .collect()
}

impl ResponseProtocol for ThreeThreeFourFivePlus {
    fn id(&self) -> &str {
        "3345plus"
    }

    #[allow(clippy::float_cmp)]
    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matcher = require_matcher(matcher, self.id())?;
        let own_matches = matcher.find(response.self_text())?;
        let other_matches = matcher.find(response.other_text())?;
        let own = level_of(&own_matches);
        let other = level_of(&other_matches);

        let escalate =
            own == 4.0 && other == 4.0 && high_phrases(&own_matches) != high_phrases(&other_matches);
        Ok(Outcome::Number(if escalate { 5.0 } else { own.max(other) }))
    }
}

/// `3345(x)^gamma`.
#[derive(Debug, Clone, Copy)]
pub struct PowerLaw {
    gamma: f64,
    base: ThreeThreeFourFive,
}

impl PowerLaw {
    #[must_use]
    pub fn new(gamma: f64, escalation: Escalation) -> Self {
        Self {
            gamma,
            base: ThreeThreeFourFive::new(escalation),
        }
    }
}

impl ResponseProtocol for PowerLaw {
    fn id(&self) -> &str {
        "powerlaw"
    }

    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matcher = require_matcher(matcher, self.id())?;
        let level = self.base.level(response, matcher)?;
        Ok(Outcome::Number(level.powf(self.gamma)))
    }
}

/// `exp(b * 3345(x)) - 1`.
#[derive(Debug, Clone, Copy)]
pub struct Exponential {
    b: f64,
    base: ThreeThreeFourFive,
}

impl Exponential {
    #[must_use]
    pub fn new(b: f64, escalation: Escalation) -> Self {
        Self {
            b,
            base: ThreeThreeFourFive::new(escalation),
        }
    }
}

impl ResponseProtocol for Exponential {
    fn id(&self) -> &str {
        "exp"
    }

    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matcher = require_matcher(matcher, self.id())?;
        let level = self.base.level(response, matcher)?;
        Ok(Outcome::Number((self.b * level).exp() - 1.0))
    }
}
