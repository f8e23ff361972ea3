//! Lexicon matching and response/subject scoring model for emotional-awareness surveys.
//!
//! A [`Lexicon`] of weighted phrases is compiled by a [`Matcher`] into a
//! boundary-aware trie. [`Response`]s hold one normalized survey answer and
//! the scores protocols assign to it; a [`Subject`] owns a participant's
//! responses and rolls their scores into totals.

pub mod app_config;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod protocol;
pub mod response;
pub mod subject;
pub mod survey;
pub mod text;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, VetaError};
pub use lexicon::{
    load_lexicon, parse_lexicon, save_lexicon, Lexicon, LexiconEntry, LexiconFormat, RawEntry,
};
pub use matcher::{BoundaryRules, MatchResult, MatchRow, Matcher};
pub use protocol::{
    require_matcher, Outcome, Protocol, ResponseProtocol, Scope, ScoreValue, Segment,
    SubjectProtocol,
};
pub use response::Response;
pub use subject::{ScoreTable, Subject, SubjectIdGenerator};
pub use survey::Survey;
pub use text::normalize_text;
