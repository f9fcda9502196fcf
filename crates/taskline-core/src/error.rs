use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TasklineError {
    #[error("List '{0}' already exists.")]
    AlreadyExists(String),
    #[error("List '{0}' not found.")]
    NotFound(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Task number out of range (1..{len})")]
    OutOfRange { position: i64, len: usize },
    #[error("Store {} is corrupt: {reason}", .path.display())]
    StorageCorrupt { path: PathBuf, reason: String },
    #[error("Failed to save data to {}: {reason}", .path.display())]
    StorageWriteFailed { path: PathBuf, reason: String },
    #[error("Refusing to modify {}: {reason}", .path.display())]
    StorageUnavailable { path: PathBuf, reason: String },
    #[error("Could not lock {}: {reason}", .path.display())]
    StorageLocked { path: PathBuf, reason: String },
}

impl TasklineError {
    pub fn invalid(message: impl Into<String>) -> Self {
        TasklineError::InvalidArgument(message.into())
    }

    /// Errors the caller got wrong (as opposed to storage trouble).
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            TasklineError::AlreadyExists(_)
                | TasklineError::InvalidArgument(_)
                | TasklineError::OutOfRange { .. }
        )
    }
}
