/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Uniqueness constraint violation
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Row decoding error
    #[error("Query error: {0}")]
    Query(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Map a write error, surfacing unique-constraint violations as `Duplicate`
/// instead of a generic database failure.
pub(crate) fn map_unique(err: sqlx::Error, what: impl Into<String>) -> StorageError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StorageError::Duplicate(what.into())
        }
        _ => StorageError::Database(err),
    }
}

impl From<StorageError> for larder_core::CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(what) => larder_core::CoreError::Duplicate(what),
            StorageError::NotFound { entity, id } => {
                larder_core::CoreError::NotFound { entity, id }
            }
            other => larder_core::CoreError::storage(other.to_string()),
        }
    }
}
