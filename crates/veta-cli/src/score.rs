//! `veta score`: parallel survey scoring.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use veta_core::{Lexicon, Matcher, Protocol, ScoreValue, Subject, Survey};
use veta_scoring::{load_plan, ProtocolRegistry, ScoringPlan, SentimentClassifier, ValenceClassifier};

#[derive(Debug, Deserialize)]
pub(crate) struct SurveyDocument {
    pub subjects: Vec<SubjectInput>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubjectInput {
    pub userid: Option<String>,
    pub responses: Vec<ResponseInput>,
    /// Respondent-level columns copied into the subject's totals.
    #[serde(default)]
    pub info: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseInput {
    #[serde(rename = "self")]
    pub self_text: String,
    #[serde(default)]
    pub other: String,
    /// Item-level columns stored beside the protocol scores.
    #[serde(default)]
    pub info: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub subjects: Vec<SubjectReport>,
    /// Per total id, the column of subject totals in input order.
    pub summary: BTreeMap<String, Vec<f64>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubjectReport {
    pub id: usize,
    pub userid: Option<String>,
    pub totals: BTreeMap<String, f64>,
    pub responses: Vec<ResponseReport>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseReport {
    pub index: usize,
    #[serde(rename = "self")]
    pub self_text: String,
    pub other: String,
    pub scores: BTreeMap<String, ScoreValue>,
}

impl From<&Subject> for SubjectReport {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id(),
            userid: subject.userid().map(str::to_string),
            totals: subject.totals().clone(),
            responses: subject
                .responses()
                .iter()
                .map(|r| ResponseReport {
                    index: r.index(),
                    self_text: r.self_text().to_string(),
                    other: r.other_text().to_string(),
                    scores: r.scores().clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct ScoreOptions {
    pub input: PathBuf,
    pub lexicon: Option<PathBuf>,
    pub plan: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub workers: usize,
    pub language: String,
}

/// Protocols from `plan`, or the standard plan when none is given.
pub(crate) fn build_registry(plan: Option<&Path>) -> anyhow::Result<ProtocolRegistry> {
    let plan = match plan {
        Some(path) => load_plan(path)?,
        None => ScoringPlan::standard(),
    };
    let classifier: Arc<dyn SentimentClassifier> = Arc::new(ValenceClassifier::default());
    Ok(ProtocolRegistry::from_plan(&plan, &classifier)?)
}

pub(crate) fn read_survey(path: &Path) -> anyhow::Result<SurveyDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read survey {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse survey {}", path.display()))
}

/// Score one contiguous batch of subjects with a matcher of its own.
fn score_batch(
    first_id: usize,
    batch: Vec<SubjectInput>,
    lexicon: Option<Lexicon>,
    protocols: &[Protocol],
) -> anyhow::Result<Survey> {
    let mut survey = Survey::with_first_id(first_id);
    if let Some(lexicon) = lexicon {
        survey.attach_matcher(Arc::new(Matcher::new(lexicon)));
    }
    for input in batch {
        let subject = survey.add_subject(input.userid.as_deref());
        for response in input.responses {
            let scored = subject.add_response(&response.self_text, &response.other);
            for (id, value) in &response.info {
                scored.add_additional_info(id, *value);
            }
        }
        for (id, value) in &input.info {
            subject.add_additional_info(id, *value);
        }
    }
    survey.score(protocols)?;
    Ok(survey)
}

/// Split `subjects` into at most `workers` contiguous batches, each paired
/// with the id of its first subject.
pub(crate) fn batches(subjects: Vec<SubjectInput>, workers: usize) -> Vec<(usize, Vec<SubjectInput>)> {
    let size = subjects.len().div_ceil(workers.max(1)).max(1);
    let mut batches = Vec::new();
    let mut rest = subjects.into_iter().peekable();
    let mut first_id = 0;
    while rest.peek().is_some() {
        let batch: Vec<SubjectInput> = rest.by_ref().take(size).collect();
        let len = batch.len();
        batches.push((first_id, batch));
        first_id += len;
    }
    batches
}

pub(crate) async fn score_survey(
    document: SurveyDocument,
    lexicon: Option<Lexicon>,
    registry: &ProtocolRegistry,
    workers: usize,
) -> anyhow::Result<Survey> {
    if registry.needs_lexicon() && lexicon.is_none() {
        anyhow::bail!("the scoring plan needs a lexicon; pass --lexicon or set VETA_LEXICON_PATH");
    }

    let protocols: Arc<Vec<Protocol>> = Arc::new(registry.protocols().to_vec());
    let mut join_set = tokio::task::JoinSet::new();
    for (position, (first_id, batch)) in batches(document.subjects, workers).into_iter().enumerate() {
        let lexicon = lexicon.clone();
        let protocols = Arc::clone(&protocols);
        join_set.spawn_blocking(move || {
            (position, score_batch(first_id, batch, lexicon, &protocols))
        });
    }

    let mut scored = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        let (position, survey) = joined.context("scoring worker panicked")?;
        scored.push((position, survey?));
    }
    scored.sort_by_key(|(position, _)| *position);

    let mut survey = Survey::new();
    for (_, batch) in scored {
        survey.append(batch);
    }
    Ok(survey)
}

pub(crate) async fn run_score(options: &ScoreOptions) -> anyhow::Result<()> {
    let registry = build_registry(options.plan.as_deref())?;
    let lexicon = options
        .lexicon
        .as_deref()
        .map(|path| crate::lexicon::load(path, &options.language))
        .transpose()?;
    let document = read_survey(&options.input)?;
    let subject_count = document.subjects.len();

    tracing::info!(
        subjects = subject_count,
        protocols = registry.len(),
        workers = options.workers,
        "scoring survey"
    );
    let survey = score_survey(document, lexicon, &registry, options.workers).await?;

    let report = ScoreReport {
        subjects: survey.subjects().iter().map(SubjectReport::from).collect(),
        summary: survey.summary(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    match &options.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write results to {}", path.display()))?;
            println!("scored {subject_count} subjects; results written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
