use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid wait spec {given:?}: {reason}")]
    InvalidWaitSpec { given: String, reason: &'static str },

    #[error("unknown database type {given:?} (expected one of: {supported})")]
    UnknownDatabaseKind { given: String, supported: String },

    #[error("invalid port {value:?} in {var}")]
    InvalidPort { var: &'static str, value: String },

    /// Any failure to reach, authenticate with or ping the endpoint.
    #[error("connection failed: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("attempt timed out after {0:?}")]
    AttemptTimedOut(Duration),
}

pub type Result<T> = std::result::Result<T, Error>;
