use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while loading an artifact.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid load options: {0}")]
    InvalidOptions(String),
    #[error("unable to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to decode event artifact: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unable to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("unable to start transaction: {0}")]
    Begin(#[source] sqlx::Error),
    #[error("unable to insert events: {0}")]
    Insert(#[source] sqlx::Error),
    #[error("unable to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),
    #[error("unable to roll back transaction: {0}")]
    Rollback(#[source] sqlx::Error),
    #[error("bulk load rolled back after {events_attempted} events: {source}")]
    BatchFailed {
        events_attempted: u64,
        #[source]
        source: Box<LoadError>,
    },
    #[error("artifact decoder stopped unexpectedly")]
    DecoderPanicked,
}
