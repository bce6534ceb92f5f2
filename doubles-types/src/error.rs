//! Error types for the test doubles.

/// Repository-level errors. Lookups report absence through `Option`/`bool`,
/// so the only failure a store raises is a key collision.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes. The payload is the message shown to
/// the caller in the `error` field.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 404: the referenced key is absent
    #[error("{0}")]
    NotFound(String),

    /// 422: missing or invalid body
    #[error("{0}")]
    Validation(String),

    /// 409: duplicate create or simulated conflict
    #[error("{0}")]
    Conflict(String),

    /// 500: injected fault
    #[error("{0}")]
    UpstreamFailure(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Conflict(msg) => AppError::Conflict(msg),
        }
    }
}
