use plantmon_core::error::ValidationError;
use std::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DBError {
    #[error(transparent)]
    SQLError(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Outcome of a failed request, split into what the caller can fix and what they can't
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{0}")]
    InvalidInput(Box<dyn error::Error + Send + Sync>),
    #[error("{0}")]
    Internal(Box<dyn error::Error + Send + Sync>),
}

impl From<ValidationError> for IngestError {
    fn from(err: ValidationError) -> Self {
        IngestError::InvalidInput(Box::from(err))
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for IngestError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        IngestError::InvalidInput(Box::from(err))
    }
}

impl From<DBError> for IngestError {
    fn from(err: DBError) -> Self {
        IngestError::Internal(Box::from(err))
    }
}
