//! Protocols that sum or count the matched lexicon entries of one response.

use veta_core::{require_matcher, Matcher, Outcome, Response, ResponseProtocol, Segment, VetaError};

use super::HIGH_SCORE;

/// Σ score × frequency over matches in the full text.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllSum;

impl ResponseProtocol for AllSum {
    fn id(&self) -> &str {
        "allsum"
    }

    #[allow(clippy::cast_precision_loss)]
    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matches = require_matcher(matcher, self.id())?.find(response.full_text())?;
        let total = matches
            .iter()
            .map(|row| row.score * row.frequency as f64)
            .sum();
        Ok(Outcome::Number(total))
    }
}

/// Σ score over distinct matched entries, frequency ignored.
#[derive(Debug, Clone)]
pub struct AllSumUnique {
    id: String,
    high_only: bool,
}

impl AllSumUnique {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: "allsum-unique".to_string(),
            high_only: false,
        }
    }

    /// Only entries scored above 2 contribute.
    #[must_use]
    pub fn high_only() -> Self {
        Self {
            id: "allsum-unique-high".to_string(),
            high_only: true,
        }
    }
}

impl Default for AllSumUnique {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseProtocol for AllSumUnique {
    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matches = require_matcher(matcher, self.id())?.find(response.full_text())?;
        let total = matches
            .iter()
            .filter(|row| !self.high_only || row.score > HIGH_SCORE)
            .map(|row| row.score)
            .sum();
        Ok(Outcome::Number(total))
    }
}

/// Number of distinct matched entries, optionally filtered by score level
/// and subclass, or reduced to "any match" when `binary`.
#[derive(Debug, Clone)]
pub struct Count {
    id: String,
    segment: Segment,
    level: Option<f64>,
    sublevel: Option<f64>,
    binary: bool,
}

impl Count {
    #[must_use]
    pub fn new(segment: Segment, level: Option<f64>, sublevel: Option<f64>, binary: bool) -> Self {
        let mut id = "count".to_string();
        if let Some(level) = level {
            id.push_str(&format!("-level-{level}"));
        }
        if let Some(sublevel) = sublevel {
            id.push_str(&format!("-sublevel-{sublevel}"));
        }
        id.push_str(&format!("-{segment}"));
        if binary {
            id.push_str("-true_false");
        }
        Self {
            id,
            segment,
            level,
            sublevel,
            binary,
        }
    }
}

impl Default for Count {
    fn default() -> Self {
        Self::new(Segment::Both, None, None, false)
    }
}

impl ResponseProtocol for Count {
    fn id(&self) -> &str {
        &self.id
    }

    #[allow(clippy::float_cmp, clippy::cast_precision_loss)]
    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matches = require_matcher(matcher, self.id())?.find(response.text(self.segment))?;
        let hits = matches
            .iter()
            .filter(|row| self.level.map_or(true, |level| row.score == level))
            .filter(|row| self.sublevel.map_or(true, |sub| row.subclass == sub))
            .count();
        if self.binary {
            Ok(Outcome::Flag(hits > 0))
        } else {
            Ok(Outcome::Number(hits as f64))
        }
    }
}

/// 1 when the matched scores mix a low level (1 or 2) with level 3.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mlr;

impl ResponseProtocol for Mlr {
    fn id(&self) -> &str {
        "mlr"
    }

    #[allow(clippy::float_cmp)]
    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matches = require_matcher(matcher, self.id())?.find(response.full_text())?;
        let low = matches.iter().any(|row| row.score == 1.0 || row.score == 2.0);
        let three = matches.iter().any(|row| row.score == 3.0);
        Ok(Outcome::Number(if low && three { 1.0 } else { 0.0 }))
    }
}
