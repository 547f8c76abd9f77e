//! Repositories mapping entities onto SQLite tables.
//!
//! # Responsibility
//! - Own table lifecycle (create/drop) and per-row persistence.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every write is a single autocommit statement; nothing spans writes.
//! - Review writes validate all fields before any SQL runs.
//! - Lookups report absence as `Ok(None)`, never as an error.

use crate::db::DbError;
use crate::model::review::ReviewValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod employee_repo;
pub mod review_repo;

use employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use review_repo::{ReviewRepository, SqliteReviewRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// A review field failed its rule; nothing was written.
    Validation(ReviewValidationError),
    /// Storage failure, including constraint violations, passed through as is.
    Db(DbError),
    /// An update targeted an id with no stored row.
    NotFound { entity: &'static str, id: i64 },
    /// A stored row breaks an entity rule.
    InvalidData(String),
}

impl RepoError {
    /// Returns whether SQLite rejected the write on a schema constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_constraint_violation())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Creates `employees` then `reviews`, skipping tables that already exist.
pub fn create_tables(conn: &Connection) -> RepoResult<()> {
    SqliteEmployeeRepository::new(conn).create_table()?;
    SqliteReviewRepository::new(conn).create_table()?;
    Ok(())
}

/// Drops `reviews` then `employees`, skipping tables that are missing.
pub fn drop_tables(conn: &Connection) -> RepoResult<()> {
    SqliteReviewRepository::new(conn).drop_table()?;
    SqliteEmployeeRepository::new(conn).drop_table()?;
    Ok(())
}
