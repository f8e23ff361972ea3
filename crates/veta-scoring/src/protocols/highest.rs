//! Top-N protocols: sums of the highest matched scores.

use veta_core::{
    require_matcher, MatchResult, Matcher, Outcome, Response, ResponseProtocol, Segment,
    SubjectProtocol, VetaError,
};

use super::combined_text;

/// Sum the `n` highest occurrence-weighted scores. An entry whose frequency
/// exceeds the remaining budget contributes only the budget.
#[allow(clippy::cast_precision_loss)]
fn top_occurrences(matches: &MatchResult, n: usize) -> f64 {
    let mut rows: Vec<_> = matches.iter().collect();
    rows.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut left = n;
    let mut total = 0.0;
    for row in rows {
        if left == 0 {
            break;
        }
        let taken = row.frequency.min(left);
        total += row.score * taken as f64;
        left -= taken;
    }
    total
}

#[derive(Debug, Clone)]
pub struct HighestN {
    id: String,
    n: usize,
}

impl HighestN {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            id: format!("highest{n}"),
            n,
        }
    }
}

impl ResponseProtocol for HighestN {
    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matches = require_matcher(matcher, self.id())?.find(response.full_text())?;
        Ok(Outcome::Number(top_occurrences(&matches, self.n)))
    }
}

/// Sum of the `n` highest distinct matched scores; all of them when fewer.
#[derive(Debug, Clone)]
pub struct HighestNUnique {
    id: String,
    n: usize,
}

impl HighestNUnique {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            id: format!("highest{n}-unique"),
            n,
        }
    }
}

impl ResponseProtocol for HighestNUnique {
    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matches = require_matcher(matcher, self.id())?.find(response.full_text())?;
        let mut scores = matches.scores();
        scores.sort_by(|a, b| b.total_cmp(a));
        Ok(Outcome::Number(scores.iter().take(self.n).sum()))
    }
}

/// [`HighestN`] over one text made of every answer a subject gave.
#[derive(Debug, Clone)]
pub struct HighestNAllInOne {
    id: String,
    n: usize,
}

impl HighestNAllInOne {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            id: format!("highest{n}-allinone"),
            n,
        }
    }
}

impl SubjectProtocol for HighestNAllInOne {
    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self, responses: &[Response], matcher: Option<&Matcher>) -> Result<f64, VetaError> {
        let matcher = require_matcher(matcher, self.id())?;
        let text = combined_text(responses, Segment::Both);
        Ok(top_occurrences(&matcher.find(&text)?, self.n))
    }
}
