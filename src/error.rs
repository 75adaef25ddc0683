//! Error types for gloss modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from configuration loading, resolution, and persistence.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown setting '{0}'. Run 'gloss config list' to see recognized settings")]
    UnknownSetting(String),

    #[error("Invalid setting '{0}'. Run 'gloss config list' to see recognized settings")]
    InvalidSetting(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from diff acquisition.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("No changes found (the diff is empty)")]
    Empty,

    #[error("Not a git repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to compute diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Revision '{revision}' not found: {source}")]
    RevisionNotFound {
        revision: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to read diff from stdin: {0}")]
    StdinRead(#[source] std::io::Error),
}

/// Errors from the hosted inference call.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error(
        "HUGGINGFACE_API_KEY is not set. Set it with:\n  \
         export HUGGINGFACE_API_KEY='your-api-key'\n\
         or add it to a .env file in the working directory"
    )]
    MissingApiKey,

    #[error("Inference request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Inference provider returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Inference provider returned no generated text")]
    EmptyCompletion,
}

/// Errors from commit creation.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git signature unavailable (set user.name and user.email): {0}")]
    SignatureMissing(#[source] git2::Error),
}

/// Errors from the editor round trip.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Failed to spawn editor '{editor}': {source}")]
    SpawnFailed {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor exited with {0}")]
    NonZeroExit(std::process::ExitStatus),

    #[error("Failed to read edited message: {0}")]
    Io(#[source] std::io::Error),
}
