//! Error types for roster-db.

use miette::Diagnostic;
use thiserror::Error;

/// Database error type for roster-db operations.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Database connection failed: {0}")]
    #[diagnostic(
        code(roster_db::connection),
        help("Check if the database file exists and is accessible")
    )]
    ConnectionError(String),

    #[error("Database query failed: {0}")]
    #[diagnostic(code(roster_db::query))]
    QueryError(#[from] rusqlite::Error),

    #[error("Database connection lock poisoned")]
    #[diagnostic(
        code(roster_db::lock),
        help("A previous database operation panicked while holding the connection")
    )]
    PoisonError,

    #[error("IO error: {0}")]
    #[diagnostic(code(roster_db::io), help("Check file permissions and disk space"))]
    IoError(#[from] std::io::Error),
}

/// Result type alias for roster-db operations.
pub type Result<T> = std::result::Result<T, DbError>;
