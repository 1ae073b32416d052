//! Error kinds surfaced by the task store.
//!
//! [`TaskError`] is the only error type returned by repository operations.
//! Store failures are classified into a small set of kinds so callers can
//! decide what to do without inspecting SQLite error codes:
//!
//! - **`InvalidArgument`**: bad input; fix the request, never retry
//! - **`NotFound`**: the targeted id does not exist
//! - **`StorageUnavailable`**: the store could not be reached or was busy; callers may back off and retry
//! - **`ConstraintViolation`**: the store rejected a row, or holds a row it should have rejected
//! - **`Storage`**: any other store error, passed through verbatim

use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors that can occur during task store operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Input rejected before reaching storage.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No task row has the requested id.
    #[error("task {0} not found")]
    NotFound(i64),

    /// Connection, pool checkout, locking or I/O failure against the store.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Store-level rejection of a write, or an unreadable stored value.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Unclassified SQLite error.
    #[error("sqlite error: {0}")]
    Storage(rusqlite::Error),
}

/// Convenience type alias for task store results.
pub type Result<T> = std::result::Result<T, TaskError>;

impl TaskError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TaskError::InvalidArgument(message.into())
    }

    /// Whether a caller may reasonably retry the failed operation.
    ///
    /// Only transport-level failures qualify; the repository itself never
    /// retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TaskError::StorageUnavailable(_))
    }
}

impl From<rusqlite::Error> for TaskError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => TaskError::ConstraintViolation(err.to_string()),
            // Corrupt, read-only or foreign files stay broken on retry and
            // fall through to `Storage`.
            Some(ErrorCode::CannotOpen | ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::SystemIoFailure) => {
                TaskError::StorageUnavailable(err.to_string())
            }
            _ => match err {
                // A stored value that cannot be mapped back (e.g. a priority
                // outside the closed set) is a broken row, not a transport issue.
                rusqlite::Error::FromSqlConversionFailure(_, _, cause) => TaskError::ConstraintViolation(cause.to_string()),
                other => TaskError::Storage(other),
            },
        }
    }
}

impl From<r2d2::Error> for TaskError {
    fn from(err: r2d2::Error) -> Self {
        TaskError::StorageUnavailable(err.to_string())
    }
}
