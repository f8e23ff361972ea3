use super::*;
use crate::lexicon::Lexicon;
use crate::protocol::{require_matcher, Outcome, ResponseProtocol, SubjectProtocol};

/// Counts matched entries in the full text.
struct Hits;

impl ResponseProtocol for Hits {
    fn id(&self) -> &str {
        "hits"
    }

    #[allow(clippy::cast_precision_loss)]
    fn execute(&self, response: &Response, matcher: Option<&Matcher>) -> Result<Outcome, VetaError> {
        let matcher = require_matcher(matcher, self.id())?;
        Ok(Outcome::Number(matcher.find(response.full_text())?.len() as f64))
    }
}

/// Returns a fixed value for the whole subject.
struct Fixed {
    id: &'static str,
    value: f64,
}

impl SubjectProtocol for Fixed {
    fn id(&self) -> &str {
        self.id
    }

    fn needs_lexicon(&self) -> bool {
        false
    }

    fn execute(&self, _: &[Response], _: Option<&Matcher>) -> Result<f64, VetaError> {
        Ok(self.value)
    }
}

struct NeedsLexicon;

impl SubjectProtocol for NeedsLexicon {
    fn id(&self) -> &str {
        "needs-lexicon"
    }

    fn execute(&self, _: &[Response], _: Option<&Matcher>) -> Result<f64, VetaError> {
        Ok(1.0)
    }
}

fn matcher() -> Arc<Matcher> {
    let mut lexicon = Lexicon::new("en");
    lexicon
        .add_entries(&["happy", "sad"], &[4.0, 2.0], None)
        .unwrap();
    lexicon.normalize();
    Arc::new(Matcher::new(lexicon))
}

fn subject() -> Subject {
    let mut subject = Subject::new(0);
    subject.attach_matcher(matcher());
    subject.add_response("I feel happy", "She seems sad");
    subject.add_response("nothing here", "");
    subject.add_response("sad", "");
    subject
}

#[test]
fn id_generator_is_sequential() {
    let mut ids = SubjectIdGenerator::new();
    assert_eq!(ids.next_id(), 0);
    assert_eq!(ids.next_id(), 1);
    assert_eq!(ids.peek(), 2);

    let mut later = SubjectIdGenerator::starting_at(10);
    assert_eq!(later.next_id(), 10);
}

#[test]
fn responses_get_positions_and_matcher() {
    let subject = subject();
    let indices: Vec<usize> = subject.responses().iter().map(Response::index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert!(subject.responses().iter().all(|r| r.matcher().is_some()));
}

#[test]
fn attach_matcher_reaches_existing_responses() {
    let mut subject = Subject::new(1);
    subject.add_response("happy", "");
    assert!(subject.responses()[0].matcher().is_none());
    subject.attach_matcher(matcher());
    assert!(subject.responses()[0].matcher().is_some());
}

#[test]
fn totals_are_per_response_sums() {
    let mut subject = subject();
    subject
        .score(&[Protocol::per_response(Hits)])
        .unwrap();

    let per_response: f64 = subject
        .responses()
        .iter()
        .map(|r| r.score_of("hits").unwrap().as_f64())
        .sum();
    assert_eq!(subject.total("hits"), Some(per_response));
    assert_eq!(subject.total("hits"), Some(3.0));
}

#[test]
fn per_subject_protocol_zeroes_response_entries() {
    let mut subject = subject();
    subject
        .score(&[Protocol::per_subject(Fixed {
            id: "fixed",
            value: 7.0,
        })])
        .unwrap();

    assert_eq!(subject.total("fixed"), Some(7.0));
    assert!(subject
        .responses()
        .iter()
        .all(|r| r.score_of("fixed") == Some(ScoreValue::Number(0.0))));
}

#[test]
fn per_subject_zero_total_survives_recompute() {
    let mut subject = subject();
    subject
        .score(&[Protocol::per_subject(Fixed {
            id: "fixed",
            value: 0.0,
        })])
        .unwrap();
    assert_eq!(subject.total("fixed"), Some(0.0));

    subject.compute_totals();
    assert_eq!(subject.total("fixed"), Some(0.0));
}

#[test]
fn zero_sum_does_not_overwrite_existing_total() {
    let mut subject = subject();
    subject.add_additional_info("manual", 5.0);
    for response in &mut subject.responses {
        response.add_additional_info("manual", 0.0);
    }
    subject.compute_totals();
    assert_eq!(subject.total("manual"), Some(5.0));
}

#[test]
fn flags_sum_as_integers() {
    let mut subject = subject();
    subject.responses[0].set_score("flag", ScoreValue::Flag(true));
    subject.responses[1].set_score("flag", ScoreValue::Flag(false));
    subject.responses[2].set_score("flag", ScoreValue::Flag(true));
    subject.compute_totals();
    assert_eq!(subject.total("flag"), Some(2.0));
}

#[test]
fn per_subject_protocol_without_matcher_fails() {
    let mut subject = Subject::new(3);
    subject.add_response("happy", "");
    let err = subject
        .score(&[Protocol::per_subject(NeedsLexicon)])
        .unwrap_err();
    assert!(matches!(err, VetaError::MissingLexicon(ref id) if id == "needs-lexicon"));
}

#[test]
fn per_response_protocol_without_matcher_fails() {
    let mut subject = Subject::new(4);
    subject.add_response("happy", "");
    let err = subject.score(&[Protocol::per_response(Hits)]).unwrap_err();
    assert!(matches!(err, VetaError::MissingLexicon(_)));
}

#[test]
fn empty_subject_scores_without_totals() {
    let mut subject = Subject::new(5);
    subject.attach_matcher(matcher());
    subject.score(&[Protocol::per_response(Hits)]).unwrap();
    assert!(subject.totals().is_empty());
}

#[test]
fn table_has_response_rows_plus_totals() {
    let mut subject = subject();
    subject
        .score(&[
            Protocol::per_response(Hits),
            Protocol::per_subject(Fixed {
                id: "fixed",
                value: 2.0,
            }),
        ])
        .unwrap();

    let table = subject.table();
    assert_eq!(table.columns, vec!["fixed".to_string(), "hits".to_string()]);
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.rows[0], vec![0.0, 2.0]);
    assert_eq!(table.rows[3], vec![2.0, 3.0]);
}

#[test]
fn display_prefers_userid() {
    let mut subject = Subject::new(9).with_userid("p-17");
    subject.add_response("calm", "");
    let rendered = subject.to_string();
    assert!(rendered.starts_with("Respondent ID p-17:\n"));
    assert!(rendered.contains("Item 1:\nSelf: calm\n"));
}
