use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings shared by the binaries.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Lexicon file used when a command is not given one explicitly.
    pub lexicon_path: Option<PathBuf>,
    /// Scoring plan used when a command is not given one explicitly.
    pub plan_path: Option<PathBuf>,
    /// Language tag applied to lexicon files that do not carry one.
    pub language: String,
    /// Number of parallel subject-scoring workers; always at least 1.
    pub workers: usize,
}
