use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "VETA_ENV"));
}

#[test]
fn empty_env_uses_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let config = build_app_config(lookup_from_map(&map)).expect("defaults are valid");

    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.language, "en");
    assert_eq!(config.workers, 4);
    assert!(config.lexicon_path.is_none());
    assert!(config.plan_path.is_none());
}

#[test]
fn paths_and_language_are_read() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("VETA_LEXICON_PATH", "./data/eleas.json");
    map.insert("VETA_PLAN_PATH", "./config/plan.yaml");
    map.insert("VETA_LANGUAGE", " ZH ");
    map.insert("VETA_WORKERS", "8");

    let config = build_app_config(lookup_from_map(&map)).expect("valid config");
    assert_eq!(
        config.lexicon_path,
        Some(PathBuf::from("./data/eleas.json"))
    );
    assert_eq!(config.plan_path, Some(PathBuf::from("./config/plan.yaml")));
    assert_eq!(config.language, "zh");
    assert_eq!(config.workers, 8);
}

#[test]
fn blank_path_is_treated_as_unset() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("VETA_LEXICON_PATH", "  ");
    let config = build_app_config(lookup_from_map(&map)).expect("valid config");
    assert!(config.lexicon_path.is_none());
}

#[test]
fn zero_workers_is_rejected() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("VETA_WORKERS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VETA_WORKERS"),
        "expected InvalidEnvVar(VETA_WORKERS), got: {result:?}"
    );
}

#[test]
fn non_numeric_workers_is_rejected() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("VETA_WORKERS", "many");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VETA_WORKERS"));
}

#[test]
fn blank_language_is_rejected() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("VETA_LANGUAGE", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VETA_LANGUAGE"));
}
