use super::*;

fn matcher(rows: &[(&str, f64)]) -> Matcher {
    let mut lexicon = Lexicon::new("en");
    for (phrase, score) in rows {
        lexicon.add_entry(phrase, *score, 0.0).unwrap();
    }
    lexicon.normalize();
    Matcher::new(lexicon)
}

fn frequency_of(result: &MatchResult, phrase: &str) -> Option<usize> {
    result
        .iter()
        .find(|r| r.phrase == phrase)
        .map(|r| r.frequency)
}

#[test]
fn no_matches_yields_empty_sequences() {
    let m = matcher(&[("happy", 4.0)]);
    let result = m.find("nothing relevant here").unwrap();
    assert!(result.is_empty());
    assert!(result.frequencies().is_empty());
    assert!(result.phrases().is_empty());
    assert!(result.scores().is_empty());
    assert_eq!(result.total_frequency(), 0);
}

#[test]
fn counts_repeated_words() {
    let m = matcher(&[("happy", 4.0), ("sad", 2.0), ("joyful", 3.0)]);
    let result = m.find("happy sad happy joyful happy").unwrap();
    assert_eq!(frequency_of(&result, "happy"), Some(3));
    assert_eq!(frequency_of(&result, "sad"), Some(1));
    assert_eq!(frequency_of(&result, "joyful"), Some(1));
}

#[test]
fn substring_of_unlisted_word_does_not_match() {
    let m = matcher(&[("sad", 2.0), ("cat", 1.0)]);
    let result = m.find("sadly the cats scattered").unwrap();
    assert!(result.is_empty(), "got {result:?}");
}

#[test]
fn boundary_cases_from_is_full_word() {
    let m = matcher(&[("cat", 1.0)]);
    for (sentence, expected) in [
        ("the cat", true),
        ("cat", true),
        ("cats", false),
        ("scat", false),
        ("scattered", false),
    ] {
        let found = !m.find(sentence).unwrap().is_empty();
        assert_eq!(found, expected, "sentence {sentence:?}");
    }
}

#[test]
fn punctuation_is_a_boundary() {
    let m = matcher(&[("angry", 2.0)]);
    let result = m.find("Angry! (very angry)").unwrap();
    assert_eq!(frequency_of(&result, "angry"), Some(2));
}

#[test]
fn multi_word_phrase_beats_its_prefix() {
    let m = matcher(&[("feel", 1.0), ("feel guilty", 3.0)]);
    let result = m.find("i feel guilty and i feel fine").unwrap();
    assert_eq!(frequency_of(&result, "feel guilty"), Some(1));
    assert_eq!(frequency_of(&result, "feel"), Some(1));
}

#[test]
fn overlapping_candidates_keep_leftmost() {
    let m = matcher(&[("not happy", 2.0), ("happy go lucky", 3.0)]);
    let result = m.find("not happy go lucky").unwrap();
    assert_eq!(result.phrases(), vec!["not happy"]);
}

#[test]
fn phrase_with_separator_matches_normalized_text() {
    let m = matcher(&[("so-so", 1.0)]);
    let result = m.find("I feel so so today").unwrap();
    assert_eq!(frequency_of(&result, "so-so"), Some(1));
}

#[test]
fn input_case_is_ignored() {
    let m = matcher(&[("happy", 4.0)]);
    assert_eq!(m.find("HAPPY").unwrap().len(), 1);
}

#[test]
fn rows_follow_lexicon_order_and_frequencies_are_positive() {
    let m = matcher(&[("zealous", 3.0), ("angry", 2.0), ("mad", 1.0)]);
    let result = m.find("mad zealous angry mad").unwrap();
    assert_eq!(result.phrases(), vec!["angry", "mad", "zealous"]);
    assert!(result.frequencies().iter().all(|&f| f >= 1));
    assert!(result.total_frequency() >= result.len());
}

#[test]
fn empty_phrase_is_invalid_input() {
    let mut lexicon = Lexicon::new("en");
    lexicon.add_entry("  ", 1.0, 0.0).unwrap();
    let m = Matcher::new(lexicon);
    assert!(matches!(m.find("anything"), Err(VetaError::InvalidInput(_))));
}

#[test]
fn punctuation_only_phrase_is_invalid_input() {
    let mut lexicon = Lexicon::new("en");
    lexicon.add_entry("?!", 1.0, 0.0).unwrap();
    let m = Matcher::new(lexicon);
    assert!(matches!(m.compile(), Err(VetaError::InvalidInput(_))));
}

#[test]
fn cache_is_reused_until_lexicon_changes() {
    let mut m = matcher(&[("happy", 4.0)]);
    assert!(m.compiled_identity().is_none());

    m.find("happy").unwrap();
    let first = m.compiled_identity().expect("compiled after first scan");
    assert_eq!(first, m.lexicon().identity());

    m.find("happy again").unwrap();
    assert_eq!(m.compiled_identity(), Some(first));

    m.lexicon_mut().add_entry("gloomy", 2.0, 0.0).unwrap();
    let result = m.find("gloomy").unwrap();
    assert_eq!(result.phrases(), vec!["gloomy"]);
    assert_ne!(m.compiled_identity(), Some(first));
}

#[test]
fn removing_an_entry_takes_effect_on_next_scan() {
    let mut m = matcher(&[("happy", 4.0), ("sad", 2.0)]);
    assert_eq!(m.find("happy sad").unwrap().len(), 2);
    m.lexicon_mut().remove_entry("sad");
    assert_eq!(m.find("happy sad").unwrap().phrases(), vec!["happy"]);
}

#[test]
fn custom_boundary_rules_allow_listed_suffix() {
    let mut lexicon = Lexicon::new("en");
    lexicon.add_entry("worr", 2.0, 0.0).unwrap();
    let rules = BoundaryRules::custom(['y'], false).unwrap();
    let m = Matcher::with_boundary_rules(lexicon, rules);
    assert_eq!(m.find("i worry").unwrap().len(), 1);
    assert!(m.find("i worried").unwrap().is_empty());
}

fn zh_matcher() -> Matcher {
    let mut lexicon = Lexicon::new("zh");
    lexicon
        .add_entries(&["开心", "难过"], &[3.0, 2.0], None)
        .unwrap();
    lexicon.normalize();
    Matcher::new(lexicon)
}

#[test]
fn chinese_match_accepts_adjoining_particles() {
    let m = zh_matcher();
    let result = m.find("我很开心").unwrap();
    assert_eq!(result.phrases(), vec!["开心"]);
}

#[test]
fn chinese_match_rejects_unlisted_neighbor() {
    let m = zh_matcher();
    assert!(m.find("开心果").unwrap().is_empty());
}

#[test]
fn chinese_adjacent_match_followed_by_word_is_discounted() {
    let m = zh_matcher();
    // 难过 starts where 开心 ends and is followed by a non-separator.
    let result = m.find("开心难过的").unwrap();
    assert_eq!(result.phrases(), vec!["开心"]);
}

#[test]
fn chinese_adjacent_match_at_sentence_end_counts() {
    let m = zh_matcher();
    let result = m.find("开心难过").unwrap();
    assert_eq!(result.len(), 2);
}

#[test]
fn chinese_chain_into_rejected_phrase_matches_nothing() {
    let m = zh_matcher();
    let result = m.find("开心难过机").unwrap();
    assert!(result.is_empty(), "got {result:?}");
}

#[test]
fn language_change_switches_boundary_rules() {
    let mut lexicon = Lexicon::new("en");
    lexicon.add_entry("开心", 3.0, 0.0).unwrap();
    let mut m = Matcher::new(lexicon);
    assert!(m.find("我很开心").unwrap().is_empty());

    m.lexicon_mut().set_language("zh");
    assert_eq!(m.find("我很开心").unwrap().len(), 1);
}
