//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `company_core` linkage against a real database file.
//! - Print table row counts so a database can be inspected quickly.
//!
//! Usage: `company_cli [DB_PATH]` (defaults to `company.db`).

use company_core::{
    core_version, create_tables, open_db, EmployeeRepository, ReviewRepository,
    SqliteEmployeeRepository, SqliteReviewRepository, DEFAULT_DB_FILE_NAME,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_FILE_NAME.to_string());

    println!("company_core version={}", core_version());
    match summarize(&db_path) {
        Ok((employees, reviews)) => {
            println!("db={db_path} employees={employees} reviews={reviews}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("db={db_path} error={err}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(db_path: &str) -> Result<(usize, usize), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    create_tables(&conn)?;

    let employees = SqliteEmployeeRepository::new(&conn).get_all()?;
    let reviews = SqliteReviewRepository::new(&conn).get_all()?;
    Ok((employees.len(), reviews.len()))
}
