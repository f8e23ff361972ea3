//! Scoring protocols for emotional-awareness surveys.
//!
//! Each protocol implements [`veta_core::ResponseProtocol`] or
//! [`veta_core::SubjectProtocol`]. A [`ScoringPlan`] names the protocols to
//! run and a [`ProtocolRegistry`] builds them in order.

pub mod error;
pub mod plan;
pub mod protocols;
pub mod registry;
pub mod sentiment;

pub use error::{ScoringError, SentimentError};
pub use plan::{load_plan, parse_plan, ProtocolSpec, ScoringPlan};
pub use registry::ProtocolRegistry;
pub use sentiment::{Polarity, Sentiment, SentimentClassifier, ValenceClassifier};
