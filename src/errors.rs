//! Unified application error type.
//! Every layer (db, core, cli) returns AppError so that the CLI can report
//! failures uniformly and tests can match on the engine's error taxonomy.

use rusqlite::ErrorCode;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store
    // ---------------------------
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] rusqlite::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    // ---------------------------
    // Engine outcomes
    // ---------------------------
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Occurrence #{0} is locked")]
    Locked(i64),

    #[error("Group #{0} has no members")]
    EmptyGroup(i64),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl From<rusqlite::Error> for AppError {
    /// Constraint violations (UNIQUE, FOREIGN KEY, CHECK) are conflicts with
    /// existing data; anything else means the store could not serve the call.
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => AppError::Conflict(e.to_string()),
            _ => AppError::StoreUnavailable(e),
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

impl AppError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
