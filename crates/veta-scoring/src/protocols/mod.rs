//! The scoring algorithms, each a [`ResponseProtocol`](veta_core::ResponseProtocol)
//! or [`SubjectProtocol`](veta_core::SubjectProtocol).

mod highest;
mod level;
mod lexical;
mod words;

pub use highest::{HighestN, HighestNAllInOne, HighestNUnique};
pub use level::{Escalation, Exponential, PowerLaw, ThreeThreeFour, ThreeThreeFourFive, ThreeThreeFourFivePlus};
pub use lexical::{AllSum, AllSumUnique, Count, Mlr};
pub use words::{Length, Vocab};

use veta_core::{Segment, Response};

/// Score above which a matched entry counts as "high".
pub(crate) const HIGH_SCORE: f64 = 2.0;

/// `base` with the segment suffix used by mode-aware protocols.
pub(crate) fn segment_id(base: &str, segment: Segment) -> String {
    match segment {
        Segment::Both => base.to_string(),
        Segment::SelfOnly => format!("{base}-self"),
        Segment::OtherOnly => format!("{base}-other"),
    }
}

/// Concatenate one segment of every response into a single text.
pub(crate) fn combined_text(responses: &[Response], segment: Segment) -> String {
    responses
        .iter()
        .map(|r| r.text(segment))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
