use thiserror::Error;

/// Failures surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A batch league move applied to fewer records than requested.
    /// Committed rows stay committed; operators reconcile from the counts.
    #[error("league move batch partially applied: {applied} of {expected}")]
    PartialBatch { expected: usize, applied: usize },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Failures surfaced across the service boundary. Storage details stay
/// behind this wrapper.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("rating update failed")]
    RatingUpdateFailed(#[source] StoreError),
}
