//! YAML scoring plans: which protocols to run, in order, with their options.
//!
//! ```yaml
//! protocols:
//!   - kind: allsum
//!   - kind: count
//!     mode: self
//!     level: 3
//!   - kind: "3345"
//!     escalation: other_segment_only
//!   - kind: highest_n
//!     n: 3
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use veta_core::{Protocol, Segment};

use crate::protocols::{
    AllSum, AllSumUnique, Count, Escalation, Exponential, HighestN, HighestNAllInOne,
    HighestNUnique, Length, Mlr, PowerLaw, ThreeThreeFour, ThreeThreeFourFive,
    ThreeThreeFourFivePlus, Vocab,
};
use crate::sentiment::{Sentiment, SentimentClassifier};
use crate::ScoringError;

/// One protocol with its options. Numeric kinds must be quoted in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProtocolSpec {
    Allsum,
    AllsumUnique {
        #[serde(default)]
        high_only: bool,
    },
    Count {
        #[serde(default)]
        mode: Segment,
        level: Option<f64>,
        sublevel: Option<f64>,
        #[serde(default)]
        binary: bool,
    },
    Length {
        #[serde(default)]
        mode: Segment,
    },
    Vocab {
        #[serde(default)]
        mode: Segment,
    },
    #[serde(rename = "334")]
    ThreeThreeFour {
        #[serde(default)]
        mode: Segment,
    },
    #[serde(rename = "3345")]
    ThreeThreeFourFive {
        #[serde(default)]
        escalation: Escalation,
    },
    #[serde(rename = "3345plus")]
    ThreeThreeFourFivePlus,
    HighestN {
        n: usize,
    },
    HighestNUnique {
        n: usize,
    },
    HighestNAllinone {
        n: usize,
    },
    Mlr,
    Powerlaw {
        gamma: f64,
        #[serde(default)]
        escalation: Escalation,
    },
    Exp {
        b: f64,
        #[serde(default)]
        escalation: Escalation,
    },
    Sentiment,
    Vader,
}

impl ProtocolSpec {
    /// Build the protocol. Sentiment kinds use `classifier`.
    #[must_use]
    pub fn build(&self, classifier: &Arc<dyn SentimentClassifier>) -> Protocol {
        match *self {
            ProtocolSpec::Allsum => Protocol::per_response(AllSum),
            ProtocolSpec::AllsumUnique { high_only: false } => {
                Protocol::per_response(AllSumUnique::new())
            }
            ProtocolSpec::AllsumUnique { high_only: true } => {
                Protocol::per_response(AllSumUnique::high_only())
            }
            ProtocolSpec::Count {
                mode,
                level,
                sublevel,
                binary,
            } => Protocol::per_response(Count::new(mode, level, sublevel, binary)),
            ProtocolSpec::Length { mode } => Protocol::per_response(Length::new(mode)),
            ProtocolSpec::Vocab { mode } => Protocol::per_subject(Vocab::new(mode)),
            ProtocolSpec::ThreeThreeFour { mode } => {
                Protocol::per_response(ThreeThreeFour::new(mode))
            }
            ProtocolSpec::ThreeThreeFourFive { escalation } => {
                Protocol::per_response(ThreeThreeFourFive::new(escalation))
            }
            ProtocolSpec::ThreeThreeFourFivePlus => Protocol::per_response(ThreeThreeFourFivePlus),
            ProtocolSpec::HighestN { n } => Protocol::per_response(HighestN::new(n)),
            ProtocolSpec::HighestNUnique { n } => Protocol::per_response(HighestNUnique::new(n)),
            ProtocolSpec::HighestNAllinone { n } => Protocol::per_subject(HighestNAllInOne::new(n)),
            ProtocolSpec::Mlr => Protocol::per_response(Mlr),
            ProtocolSpec::Powerlaw { gamma, escalation } => {
                Protocol::per_response(PowerLaw::new(gamma, escalation))
            }
            ProtocolSpec::Exp { b, escalation } => {
                Protocol::per_response(Exponential::new(b, escalation))
            }
            ProtocolSpec::Sentiment => Protocol::per_response(Sentiment::new(Arc::clone(classifier))),
            ProtocolSpec::Vader => Protocol::per_response(Sentiment::vader(Arc::clone(classifier))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPlan {
    pub protocols: Vec<ProtocolSpec>,
}

impl ScoringPlan {
    /// The protocols run when no plan file is given.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            protocols: vec![
                ProtocolSpec::Allsum,
                ProtocolSpec::AllsumUnique { high_only: false },
                ProtocolSpec::Count {
                    mode: Segment::Both,
                    level: None,
                    sublevel: None,
                    binary: false,
                },
                ProtocolSpec::Length {
                    mode: Segment::Both,
                },
                ProtocolSpec::ThreeThreeFour {
                    mode: Segment::Both,
                },
                ProtocolSpec::ThreeThreeFourFive {
                    escalation: Escalation::BothSegments,
                },
                ProtocolSpec::ThreeThreeFourFivePlus,
                ProtocolSpec::Mlr,
                ProtocolSpec::Vocab {
                    mode: Segment::Both,
                },
            ],
        }
    }
}

/// Load and validate a scoring plan from a YAML file.
///
/// # Errors
///
/// Returns `ScoringError` if the file cannot be read, parsed, or fails validation.
pub fn load_plan(path: &Path) -> Result<ScoringPlan, ScoringError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScoringError::PlanFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    let plan = parse_plan(&content)?;
    tracing::info!(path = %path.display(), protocols = plan.protocols.len(), "scoring plan loaded");
    Ok(plan)
}

/// Parse and validate a scoring plan from YAML text.
///
/// # Errors
///
/// Returns `ScoringError` if the text cannot be parsed or fails validation.
pub fn parse_plan(content: &str) -> Result<ScoringPlan, ScoringError> {
    let plan: ScoringPlan = serde_yaml::from_str(content)?;
    validate_plan(&plan)?;
    Ok(plan)
}

fn finite(kind: &str, name: &str, value: f64) -> Result<(), ScoringError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScoringError::PlanValidation(format!(
            "{kind}: {name} must be a finite number, got {value}"
        )))
    }
}

fn validate_plan(plan: &ScoringPlan) -> Result<(), ScoringError> {
    if plan.protocols.is_empty() {
        return Err(ScoringError::PlanValidation(
            "plan must list at least one protocol".to_string(),
        ));
    }

    for spec in &plan.protocols {
        match *spec {
            ProtocolSpec::HighestN { n }
            | ProtocolSpec::HighestNUnique { n }
            | ProtocolSpec::HighestNAllinone { n } => {
                if n == 0 {
                    return Err(ScoringError::PlanValidation(
                        "highest_n protocols need n >= 1".to_string(),
                    ));
                }
            }
            ProtocolSpec::Count {
                level, sublevel, ..
            } => {
                if let Some(level) = level {
                    finite("count", "level", level)?;
                }
                if let Some(sublevel) = sublevel {
                    finite("count", "sublevel", sublevel)?;
                }
            }
            ProtocolSpec::Powerlaw { gamma, .. } => finite("powerlaw", "gamma", gamma)?,
            ProtocolSpec::Exp { b, .. } => finite("exp", "b", b)?,
            _ => {}
        }
    }
    Ok(())
}
