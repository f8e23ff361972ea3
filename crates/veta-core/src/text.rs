//! Sentence cleaning applied to every survey answer before scoring.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-,.?!;:/\s]+").expect("valid separator regex"));

/// Lowercase `sentence`, turn separator runs into single spaces and trim.
#[must_use]
pub fn normalize_text(sentence: &str) -> String {
    let lowered = sentence.to_lowercase();
    SEPARATORS.replace_all(&lowered, " ").trim().to_string()
}

/// Join two already-normalized segments with a single space.
#[must_use]
pub fn join_segments(first: &str, second: &str) -> String {
    match (first.is_empty(), second.is_empty()) {
        (true, _) => second.to_string(),
        (_, true) => first.to_string(),
        _ => format!("{first} {second}"),
    }
}

/// Split normalized text into its space-delimited words.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|w| !w.is_empty())
}
