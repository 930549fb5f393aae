use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("SQLite database error: {0}")]
    RusqliteError(#[from] rusqlite::Error),

    #[error(transparent)]
    Db(#[from] roster_db::DbError),

    #[error("Database connection lock poisoned")]
    PoisonError,
}

pub type RosterResult<T> = std::result::Result<T, RosterError>;
