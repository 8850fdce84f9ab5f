//! Error types shared by the store, the controller and the CLI.

use thiserror::Error;

/// Errors surfaced by todo list operations.
///
/// Corrupt persisted data is never an error: the loader recovers locally and
/// these variants only describe failures a caller can act on.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for todo list operations.
pub type Result<T> = std::result::Result<T, Error>;
