//! Error taxonomy shared by the stores and the library service.

use std::fmt;
use thiserror::Error;

/// Errors surfaced by stores and by [`LibraryService`](crate::app::LibraryService).
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Malformed identifier or request body. The caller must fix the input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} '{key}' does not exist")]
    NotFound { entity: &'static str, key: String },

    /// A cross-entity precondition failed, e.g. a game referencing a missing developer.
    #[error("referential integrity violation: {0}")]
    ReferentialIntegrityViolation(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The request deadline expired or the caller went away mid-operation.
    #[error("operation cancelled: {0}")]
    Cancelled(String),

    /// Failure of one step of a multi-step operation.
    #[error("{step} failed: {source}")]
    Step {
        step: OperationStep,
        #[source]
        source: Box<LibraryError>,
    },
}

pub type Result<T> = std::result::Result<T, LibraryError>;

/// Flattened error kind, used for status mapping and retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    ReferentialIntegrityViolation,
    StorageUnavailable,
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::ReferentialIntegrityViolation => "referential_integrity_violation",
            ErrorKind::StorageUnavailable => "storage_unavailable",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

/// Named steps of the multi-step operations in the library service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStep {
    /// Developer lookup before inserting a game.
    ResolveDeveloper,
    InsertGame,
    /// First cascade step: removing every game of the developer.
    DeleteDeveloperGames,
    /// Second cascade step: removing the developer record.
    DeleteDeveloper,
}

impl OperationStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStep::ResolveDeveloper => "resolve_developer",
            OperationStep::InsertGame => "insert_game",
            OperationStep::DeleteDeveloperGames => "delete_developer_games",
            OperationStep::DeleteDeveloper => "delete_developer",
        }
    }
}

impl fmt::Display for OperationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LibraryError {
    pub fn not_found(entity: &'static str, key: impl fmt::Display) -> Self {
        LibraryError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Annotates the error with the step it happened in.
    pub fn during(self, step: OperationStep) -> Self {
        LibraryError::Step {
            step,
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LibraryError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LibraryError::NotFound { .. } => ErrorKind::NotFound,
            LibraryError::ReferentialIntegrityViolation(_) => {
                ErrorKind::ReferentialIntegrityViolation
            }
            LibraryError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            LibraryError::Cancelled(_) => ErrorKind::Cancelled,
            LibraryError::Step { source, .. } => source.kind(),
        }
    }

    /// The outermost step annotation, if any.
    pub fn failed_step(&self) -> Option<OperationStep> {
        match self {
            LibraryError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Whether the caller may retry the same request unchanged. Nothing in
    /// this crate retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::StorageUnavailable | ErrorKind::Cancelled
        )
    }
}

impl From<sqlx::Error> for LibraryError {
    fn from(err: sqlx::Error) -> Self {
        LibraryError::StorageUnavailable(err.to_string())
    }
}
