use thiserror::Error;

/// Errors raised by the lexicon, matcher and response/subject model.
#[derive(Debug, Error)]
pub enum VetaError {
    /// A lexicon row violates the `(text, number, number)` shape contract.
    #[error("invalid lexicon entry: {0}")]
    InvalidEntry(String),

    /// The matcher was given an empty phrase or a malformed boundary configuration.
    #[error("invalid matcher input: {0}")]
    InvalidInput(String),

    /// A protocol that needs lexicon matching ran without an attached matcher.
    #[error("no lexicon attached; protocol '{0}' requires one")]
    MissingLexicon(String),

    /// A protocol was invoked through an entry point its scope does not support.
    #[error("protocol '{id}' cannot be executed {reason}")]
    UnsupportedProtocolSignature { id: String, reason: String },

    #[error("failed to read lexicon file {path}: {source}")]
    LexiconFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lexicon file {path}: {reason}")]
    LexiconFileParse { path: String, reason: String },

    #[error("lexicon file type not supported: {0}")]
    UnsupportedFileType(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
