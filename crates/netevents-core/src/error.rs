use thiserror::Error;

/// Core error type shared across netevents crates.
#[derive(Debug, Error)]
pub enum Error {
    /// An event type code outside the fixed enumeration.
    #[error("unknown event type code: {0}")]
    UnknownEventType(i32),
    /// An event violates a domain invariant.
    #[error("invalid event '{event_ref}': {reason}")]
    InvalidEvent { event_ref: String, reason: String },
    /// The connection string cannot be used as a load target.
    #[error("invalid connection target: {0}")]
    InvalidConnection(String),
    /// The connection string names an engine we do not load into.
    #[error("unsupported engine: {0}")]
    UnsupportedEngine(String),
}

/// Convenience alias for results returned by netevents crates.
pub type Result<T> = std::result::Result<T, Error>;
