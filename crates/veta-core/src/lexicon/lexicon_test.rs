use serde_json::json;

use super::*;

fn sample() -> Lexicon {
    let mut lexicon = Lexicon::new("en");
    lexicon
        .add_entries(
            &["Sad", "happy", "feel blue", "neutral"],
            &[2.0, 4.0, 3.0, 0.0],
            Some(&[0.0, 1.0, 0.0, 0.0]),
        )
        .expect("valid batch");
    lexicon
}

#[test]
fn add_entry_rejects_nan_score() {
    let mut lexicon = Lexicon::new("en");
    let err = lexicon.add_entry("happy", f64::NAN, 0.0).unwrap_err();
    assert!(matches!(err, VetaError::InvalidEntry(_)));
    assert!(lexicon.is_empty());
}

#[test]
fn add_entry_rejects_infinite_subclass() {
    let mut lexicon = Lexicon::new("en");
    let err = lexicon.add_entry("happy", 1.0, f64::INFINITY).unwrap_err();
    assert!(matches!(err, VetaError::InvalidEntry(_)));
}

#[test]
fn add_entries_defaults_subclass_to_zero() {
    let mut lexicon = Lexicon::new("en");
    lexicon
        .add_entries(&["calm", "tense"], &[2.0, 3.0], None)
        .expect("valid batch");
    assert!(lexicon.entries().iter().all(|e| e.subclass == 0.0));
}

#[test]
fn add_entries_rejects_length_mismatch_without_partial_insert() {
    let mut lexicon = Lexicon::new("en");
    let err = lexicon
        .add_entries(&["calm", "tense"], &[2.0], None)
        .unwrap_err();
    assert!(matches!(err, VetaError::InvalidEntry(_)));
    assert!(lexicon.is_empty());
}

#[test]
fn raw_entry_with_non_text_phrase_is_invalid() {
    let mut lexicon = Lexicon::new("en");
    let raw = RawEntry::new(json!(42), json!(3), None);
    let err = lexicon.add_raw_entry(&raw).unwrap_err();
    assert!(matches!(err, VetaError::InvalidEntry(ref m) if m.contains("text")));
}

#[test]
fn raw_entry_with_non_numeric_score_is_invalid() {
    let raw = RawEntry::new(json!("happy"), json!("very"), None);
    assert!(matches!(raw.to_entry(), Err(VetaError::InvalidEntry(_))));

    let raw = RawEntry::new(json!("happy"), json!(true), None);
    assert!(matches!(raw.to_entry(), Err(VetaError::InvalidEntry(_))));
}

#[test]
fn raw_entry_accepts_numeric_strings_and_null_subclass() {
    let raw = RawEntry::new(json!("happy"), json!(" 4 "), Some(json!(null)));
    let entry = raw.to_entry().expect("numeric string accepted");
    assert_eq!(entry.score, 4.0);
    assert_eq!(entry.subclass, 0.0);
}

#[test]
fn normalize_lowercases_prunes_and_sorts() {
    let mut lexicon = sample();
    lexicon.normalize();

    let phrases: Vec<&str> = lexicon.entries().iter().map(|e| e.phrase.as_str()).collect();
    assert_eq!(phrases, vec!["feel blue", "happy", "sad"]);
}

#[test]
fn normalize_keeps_first_duplicate() {
    let mut lexicon = Lexicon::new("en");
    lexicon.add_entry("Happy", 4.0, 0.0).unwrap();
    lexicon.add_entry("happy", 1.0, 0.0).unwrap();
    lexicon.normalize();

    assert_eq!(lexicon.len(), 1);
    assert_eq!(lexicon.entries()[0].score, 4.0);
}

#[test]
fn normalize_keeps_zero_score_with_subclass() {
    let mut lexicon = Lexicon::new("en");
    lexicon.add_entry("meh", 0.0, 2.0).unwrap();
    lexicon.normalize();
    assert_eq!(lexicon.len(), 1);
}

#[test]
fn identity_changes_on_mutation_only() {
    let mut lexicon = sample();
    let first = lexicon.identity();

    lexicon.normalize();
    let normalized = lexicon.identity();
    assert_ne!(first, normalized);

    lexicon.normalize();
    assert_eq!(normalized, lexicon.identity(), "no-op normalize keeps identity");

    lexicon.add_entry("angry", 2.0, 0.0).unwrap();
    assert_ne!(normalized, lexicon.identity());
}

#[test]
fn remove_absent_entry_is_a_no_op() {
    let mut lexicon = sample();
    let before = lexicon.identity();
    assert!(!lexicon.remove_entry("ecstatic"));
    assert_eq!(before, lexicon.identity());
    assert_eq!(lexicon.len(), 4);
}

#[test]
fn remove_entry_ignores_case() {
    let mut lexicon = sample();
    assert!(lexicon.remove_entry("SAD"));
    assert!(lexicon.get("sad").is_none());
}

#[test]
fn set_language_changes_identity() {
    let mut lexicon = sample();
    let before = lexicon.identity();
    lexicon.set_language("ZH");
    assert_eq!(lexicon.language(), "zh");
    assert_ne!(before, lexicon.identity());
}

#[test]
fn display_aligns_scores() {
    let mut lexicon = Lexicon::new("en");
    lexicon.add_entry("sad", 2.0, 0.0).unwrap();
    let rendered = lexicon.to_string();
    assert_eq!(rendered, format!("sad:{}2\n", " ".repeat(17)));
}

#[test]
fn parse_text_rows_with_tabs_and_commas() {
    let content = "# phrase\tscore\tsubclass\nhappy\t4\t1\n\nsad, 2\n";
    let lexicon = parse_lexicon(content, LexiconFormat::Text, "en").expect("valid text");
    assert_eq!(lexicon.len(), 2);
    let happy = lexicon.get("happy").unwrap();
    assert_eq!(happy.subclass, 1.0);
}

#[test]
fn parse_text_reports_bad_row_number() {
    let content = "happy\t4\nsad\tlots\n";
    let err = parse_lexicon(content, LexiconFormat::Text, "en").unwrap_err();
    assert!(matches!(err, VetaError::InvalidEntry(ref m) if m.starts_with("row 2")));
}

#[test]
fn parse_json_uses_document_language_over_fallback() {
    let content = r#"{"language": "zh", "entries": [{"phrase": "开心", "score": 3}]}"#;
    let lexicon = parse_lexicon(content, LexiconFormat::Json, "en").unwrap();
    assert_eq!(lexicon.language(), "zh");
    assert_eq!(lexicon.name(), "wordlist");
    assert_eq!(lexicon.creator(), "veta");
}

#[test]
fn parse_yaml_falls_back_to_given_language() {
    let content = "name: eleas\nentries:\n  - phrase: Happy\n    score: 4\n";
    let lexicon = parse_lexicon(content, LexiconFormat::Yaml, "de").unwrap();
    assert_eq!(lexicon.language(), "de");
    assert_eq!(lexicon.name(), "eleas");
    assert_eq!(lexicon.entries()[0].phrase, "happy");
}

#[test]
fn format_from_unknown_extension_is_unsupported() {
    let err = LexiconFormat::from_path(std::path::Path::new("words.csv")).unwrap_err();
    assert!(matches!(err, VetaError::UnsupportedFileType(_)));
}

#[test]
fn save_and_reload_round_trips_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lexicon.json");

    let mut lexicon = sample();
    lexicon.normalize();
    save_lexicon(&lexicon, &path).unwrap();
    let reloaded = load_lexicon(&path, "en").unwrap();

    assert_eq!(reloaded.entries(), lexicon.entries());
    assert_eq!(reloaded.language(), "en");
    assert_ne!(reloaded.identity(), lexicon.identity());
}

#[test]
fn save_and_reload_round_trips_yaml_and_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut lexicon = sample();
    lexicon.normalize();

    for name in ["lexicon.yaml", "lexicon.txt"] {
        let path = dir.path().join(name);
        save_lexicon(&lexicon, &path).unwrap();
        let reloaded = load_lexicon(&path, "en").unwrap();
        assert_eq!(reloaded.entries(), lexicon.entries(), "{name}");
    }
}

#[test]
fn load_missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_lexicon(&dir.path().join("missing.json"), "en").unwrap_err();
    assert!(matches!(err, VetaError::LexiconFileIo { .. }));
}
