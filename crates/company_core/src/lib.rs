//! Employee and review persistence over a single SQLite database.
//!
//! Callers open a connection with [`db::open_db`], pass it into the
//! repositories, and get plain entity values back.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, DbError, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::employee::{DepartmentId, Employee, EmployeeId};
pub use model::review::{Review, ReviewId, ReviewValidationError, MIN_REVIEW_YEAR};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::review_repo::{ReviewRepository, SqliteReviewRepository};
pub use repo::{create_tables, drop_tables, RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
