//! SQLite session bootstrap.
//!
//! # Responsibility
//! - Open and configure the single connection every repository borrows.
//!
//! # Invariants
//! - Returned connections enforce foreign keys (`PRAGMA foreign_keys = ON`).
//! - There is no process-wide connection; callers own the handle and pass it
//!   into repositories explicitly.
//! - Tables are owned by the entity repositories, not by this module.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory};

/// Conventional file name for the company database.
pub const DEFAULT_DB_FILE_NAME: &str = "company.db";

pub type DbResult<T> = Result<T, DbError>;

/// Storage-level failure surfaced unmodified from SQLite.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Returns whether this error is a SQLite constraint violation
    /// (foreign key, unique, not-null, ...).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code == rusqlite::ErrorCode::ConstraintViolation
            }
            Self::Sqlite(_) => false,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
