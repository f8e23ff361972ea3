//! A survey participant: an ordered set of responses and their totals.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::matcher::Matcher;
use crate::protocol::{Protocol, ScoreValue};
use crate::response::Response;
use crate::VetaError;

/// Hands out sequential subject ids. Owned by whoever creates subjects.
#[derive(Debug, Default)]
pub struct SubjectIdGenerator {
    next: usize,
}

impl SubjectIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start numbering at `first`, e.g. to continue after subjects created elsewhere.
    #[must_use]
    pub fn starting_at(first: usize) -> Self {
        Self { next: first }
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    #[must_use]
    pub fn peek(&self) -> usize {
        self.next
    }

    pub fn next_id(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Per-subject score columns: one row per response followed by the totals row.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct Subject {
    id: usize,
    userid: Option<String>,
    responses: Vec<Response>,
    totals: BTreeMap<String, f64>,
    matcher: Option<Arc<Matcher>>,
}

impl Subject {
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self {
            id,
            userid: None,
            responses: Vec::new(),
            totals: BTreeMap::new(),
            matcher: None,
        }
    }

    #[must_use]
    pub fn with_userid(mut self, userid: &str) -> Self {
        self.userid = Some(userid.to_string());
        self
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn userid(&self) -> Option<&str> {
        self.userid.as_deref()
    }

    #[must_use]
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    #[must_use]
    pub fn totals(&self) -> &BTreeMap<String, f64> {
        &self.totals
    }

    #[must_use]
    pub fn total(&self, id: &str) -> Option<f64> {
        self.totals.get(id).copied()
    }

    /// Create a response from raw text and append it.
    pub fn add_response(&mut self, self_text: &str, other_text: &str) -> &mut Response {
        self.push_response(Response::new(self_text, other_text))
    }

    /// Append an existing response, giving it this subject's matcher and the next position.
    pub fn push_response(&mut self, mut response: Response) -> &mut Response {
        response.set_index(self.responses.len() + 1);
        if let Some(matcher) = &self.matcher {
            response.attach_matcher(Arc::clone(matcher));
        }
        tracing::debug!(subject = self.id, index = response.index(), "response added");
        self.responses.push(response);
        let last = self.responses.len() - 1;
        &mut self.responses[last]
    }

    /// Attach a matcher to this subject and every response it owns.
    pub fn attach_matcher(&mut self, matcher: Arc<Matcher>) {
        for response in &mut self.responses {
            response.attach_matcher(Arc::clone(&matcher));
        }
        self.matcher = Some(matcher);
    }

    /// Record a subject-level value that did not come from a protocol.
    pub fn add_additional_info(&mut self, id: &str, value: f64) {
        self.totals.insert(id.to_string(), value);
    }

    /// Run every protocol, then recompute totals.
    ///
    /// Per-response protocols are applied to each response in order. A
    /// per-subject protocol first zeroes its id on every response, then runs
    /// once over the whole response set and writes `totals[id]` directly.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::MissingLexicon`] if a protocol needs a matcher and
    /// none is attached, or any error raised by a protocol.
    pub fn score(&mut self, protocols: &[Protocol]) -> Result<(), VetaError> {
        tracing::info!(subject = self.id, protocols = protocols.len(), "scoring subject");

        for protocol in protocols {
            match protocol {
                Protocol::PerResponse(_) => {
                    for response in &mut self.responses {
                        response.score(protocol)?;
                    }
                }
                Protocol::PerSubject(p) => {
                    let id = p.id();
                    let matcher = if p.needs_lexicon() {
                        let Some(matcher) = self.matcher.as_deref() else {
                            return Err(VetaError::MissingLexicon(id.to_string()));
                        };
                        Some(matcher)
                    } else {
                        None
                    };
                    for response in &mut self.responses {
                        response.set_score(id, ScoreValue::Number(0.0));
                    }
                    let total = p.execute(&self.responses, matcher)?;
                    tracing::debug!(subject = self.id, protocol = id, total, "per-subject result");
                    self.totals.insert(id.to_string(), total);
                }
            }
        }

        self.compute_totals();
        Ok(())
    }

    /// Sum every score id seen on the first response across all responses.
    ///
    /// An existing total is left alone when the new sum is exactly 0, so a
    /// per-subject result is not clobbered by its zeroed per-response entries.
    #[allow(clippy::float_cmp)]
    pub fn compute_totals(&mut self) {
        let Some(first) = self.responses.first() else {
            tracing::warn!(subject = self.id, "no responses; totals not computed");
            return;
        };

        let ids: Vec<String> = first.scores().keys().cloned().collect();
        for id in ids {
            let total: f64 = self
                .responses
                .iter()
                .map(|r| r.score_of(&id).map_or(0.0, ScoreValue::as_f64))
                .sum();
            if total != 0.0 || !self.totals.contains_key(&id) {
                self.totals.insert(id, total);
            }
        }
        tracing::debug!(subject = self.id, totals = self.totals.len(), "totals computed");
    }

    /// Tabulate scores with columns sorted by id; per-response cells are 0 for
    /// totals that have no per-response counterpart.
    #[must_use]
    pub fn table(&self) -> ScoreTable {
        let columns: Vec<String> = self.totals.keys().cloned().collect();
        let mut rows: Vec<Vec<f64>> = self
            .responses
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|c| r.score_of(c).map_or(0.0, ScoreValue::as_f64))
                    .collect()
            })
            .collect();
        rows.push(self.totals.values().copied().collect());
        ScoreTable { columns, rows }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.userid {
            Some(userid) => writeln!(f, "Respondent ID {userid}:")?,
            None => writeln!(f, "Respondent ID {}:", self.id)?,
        }
        for response in &self.responses {
            write!(f, "\nItem {}:\n{response}", response.index())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "subject_test.rs"]
mod tests;
