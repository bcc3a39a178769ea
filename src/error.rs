//! Error types for the library layers.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CorpusError>;

/// Failures that abort a corpus build. Per-file read problems are not
/// errors; they are recorded in the build outcome instead.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Repository source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corpus build cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("IO error while mirroring: {0}")]
    Io(#[from] std::io::Error),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid repository name: {0:?}")]
    InvalidName(String),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Analysis backend is not configured: {0}")]
    NotConfigured(String),
}

/// Failures surfaced by the application services.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Mirror(#[from] MirrorError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Failed serializing analysis result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed reading corpus {}: {source}", path.display())]
    CorpusUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
