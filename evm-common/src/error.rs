//! Common error types for EVM

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Common result type for EVM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across both EVM services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation conflicts with current database state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Kind of write that produced a database error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Insert,
    Update,
    Delete,
}

impl Error {
    /// Classify a failed write by the constraint it violated.
    ///
    /// `what` names the record being written, e.g. "event" or "artist assignment".
    pub fn from_write(err: sqlx::Error, op: WriteOp, what: &str) -> Self {
        let kind = match &err {
            // SQLITE_CONSTRAINT_TRIGGER: a trigger RAISE(ABORT) or a RESTRICT action
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("1811") => {
                return Error::Conflict(format!("{} conflicts with current state: {}", what, err))
            }
            sqlx::Error::Database(db_err) => db_err.kind(),
            _ => return Error::Database(err),
        };

        match kind {
            ErrorKind::UniqueViolation => Error::Conflict(format!("{} already exists", what)),
            ErrorKind::ForeignKeyViolation if op == WriteOp::Delete => Error::Conflict(format!(
                "{} is still referenced by other records",
                what
            )),
            ErrorKind::ForeignKeyViolation => Error::InvalidInput(format!(
                "{} references a record that does not exist",
                what
            )),
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                Error::InvalidInput(format!("{} violates a constraint: {}", what, err))
            }
            _ => Error::Database(err),
        }
    }
}
