//! A collection of subjects scored with one lexicon.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::matcher::Matcher;
use crate::protocol::Protocol;
use crate::subject::{Subject, SubjectIdGenerator};
use crate::VetaError;

#[derive(Debug, Default)]
pub struct Survey {
    subjects: Vec<Subject>,
    ids: SubjectIdGenerator,
    matcher: Option<Arc<Matcher>>,
}

impl Survey {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Survey whose subject ids start at `first_id`.
    #[must_use]
    pub fn with_first_id(first_id: usize) -> Self {
        Self {
            ids: SubjectIdGenerator::starting_at(first_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Create a subject with the next id and return it for filling in.
    pub fn add_subject(&mut self, userid: Option<&str>) -> &mut Subject {
        let mut subject = Subject::new(self.ids.next_id());
        if let Some(userid) = userid {
            subject = subject.with_userid(userid);
        }
        if let Some(matcher) = &self.matcher {
            subject.attach_matcher(Arc::clone(matcher));
        }
        self.subjects.push(subject);
        let last = self.subjects.len() - 1;
        &mut self.subjects[last]
    }

    /// Move every subject of `other` to the end of this survey. Subjects keep
    /// the matcher they already carry; new ids continue past the largest id seen.
    pub fn append(&mut self, other: Survey) {
        if let Some(max) = other.subjects.iter().map(Subject::id).max() {
            if max >= self.ids.peek() {
                self.ids = SubjectIdGenerator::starting_at(max + 1);
            }
        }
        self.subjects.extend(other.subjects);
    }

    pub fn attach_matcher(&mut self, matcher: Arc<Matcher>) {
        for subject in &mut self.subjects {
            subject.attach_matcher(Arc::clone(&matcher));
        }
        self.matcher = Some(matcher);
    }

    /// Score every subject in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while scoring a subject.
    pub fn score(&mut self, protocols: &[Protocol]) -> Result<(), VetaError> {
        for subject in &mut self.subjects {
            subject.score(protocols)?;
        }
        tracing::info!(subjects = self.subjects.len(), "survey scored");
        Ok(())
    }

    /// Column of subject totals for every total id seen on any subject.
    ///
    /// Subjects lacking an id contribute no value to that column.
    #[must_use]
    pub fn summary(&self) -> BTreeMap<String, Vec<f64>> {
        let mut summary: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for subject in &self.subjects {
            for (id, total) in subject.totals() {
                summary.entry(id.clone()).or_default().push(*total);
            }
        }
        summary
    }
}

impl std::fmt::Display for Survey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, subject) in self.subjects.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{subject}")?;
        }
        Ok(())
    }
}
