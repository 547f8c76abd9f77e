//! Review repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Manage the `reviews` table lifecycle.
//! - Construct reviews whose employee reference resolves at assignment time.
//! - Insert-or-update, fetch, enumerate and delete review rows.
//!
//! # Invariants
//! - `new_review`, `update` and `assign_employee` look the employee up on
//!   every call; the `reviews.employee_id` foreign key is only a backstop.
//! - `update` checks all three fields before assigning any of them.
//! - Read paths reject stored rows that break the scalar rules.

use crate::model::employee::EmployeeId;
use crate::model::review::{
    validate_summary, validate_year, Review, ReviewId, ReviewValidationError,
};
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::repo::{RepoError, RepoResult};
use log::{debug, info, warn};
use rusqlite::{params, Connection, Row};

const REVIEW_SELECT_SQL: &str = "SELECT id, year, summary, employee_id FROM reviews";

/// Repository interface for review persistence.
pub trait ReviewRepository {
    /// Creates the `reviews` table if it does not exist.
    fn create_table(&self) -> RepoResult<()>;
    /// Drops the `reviews` table if it exists.
    fn drop_table(&self) -> RepoResult<()>;
    /// Builds an unsaved, fully validated review.
    fn new_review(&self, year: i64, summary: &str, employee_id: EmployeeId)
    -> RepoResult<Review>;
    /// Points the review at another existing employee, in memory only.
    fn assign_employee(&self, review: &mut Review, employee_id: EmployeeId) -> RepoResult<()>;
    /// Inserts an unsaved review or updates the row its id points at.
    fn save(&self, review: &mut Review) -> RepoResult<()>;
    /// Validates and assigns all fields, then saves.
    fn update(
        &self,
        review: &mut Review,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<()>;
    /// Fetches one review, `None` when no row matches.
    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>>;
    /// Deletes the stored row and clears the in-memory id.
    fn delete(&self, review: &mut Review) -> RepoResult<()>;
    /// Returns every stored review in storage order.
    fn get_all(&self) -> RepoResult<Vec<Review>>;

    /// Builds a review and saves it in one step.
    fn create(&self, year: i64, summary: &str, employee_id: EmployeeId) -> RepoResult<Review> {
        let mut review = self.new_review(year, summary, employee_id)?;
        self.save(&mut review)?;
        Ok(review)
    }
}

/// SQLite-backed review repository.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
    employees: SqliteEmployeeRepository<'conn>,
}

impl<'conn> SqliteReviewRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            employees: SqliteEmployeeRepository::new(conn),
        }
    }

    fn ensure_employee_exists(&self, employee_id: EmployeeId) -> RepoResult<()> {
        if self.employees.exists(employee_id)? {
            return Ok(());
        }
        warn!(
            "event=review_validate module=repo status=rejected field=employee_id employee_id={employee_id}"
        );
        Err(ReviewValidationError::UnknownEmployee(employee_id).into())
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY,
                year INTEGER,
                summary TEXT,
                employee_id INTEGER,
                FOREIGN KEY (employee_id) REFERENCES employees(id)
            );",
        )?;
        info!("event=table_create module=repo status=ok table=reviews");
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS reviews;")?;
        info!("event=table_drop module=repo status=ok table=reviews");
        Ok(())
    }

    fn new_review(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<Review> {
        validate_year(year)?;
        validate_summary(summary)?;
        self.ensure_employee_exists(employee_id)?;
        Ok(Review::new(year, summary, employee_id)?)
    }

    fn assign_employee(&self, review: &mut Review, employee_id: EmployeeId) -> RepoResult<()> {
        self.ensure_employee_exists(employee_id)?;
        review.set_employee_id_checked(employee_id);
        Ok(())
    }

    fn save(&self, review: &mut Review) -> RepoResult<()> {
        match review.id() {
            None => {
                self.conn.execute(
                    "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
                    params![review.year(), review.summary(), review.employee_id()],
                )?;
                let id = self.conn.last_insert_rowid();
                review.set_id(Some(id));
                debug!("event=row_insert module=repo status=ok table=reviews id={id}");
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE reviews
                     SET year = ?1, summary = ?2, employee_id = ?3
                     WHERE id = ?4;",
                    params![review.year(), review.summary(), review.employee_id(), id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "review",
                        id,
                    });
                }
                debug!("event=row_update module=repo status=ok table=reviews id={id}");
            }
        }

        Ok(())
    }

    fn update(
        &self,
        review: &mut Review,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<()> {
        validate_year(year)?;
        validate_summary(summary)?;
        self.ensure_employee_exists(employee_id)?;

        review.set_year(year)?;
        review.set_summary(summary)?;
        review.set_employee_id_checked(employee_id);
        self.save(review)
    }

    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_review_row(row)?));
        }

        Ok(None)
    }

    fn delete(&self, review: &mut Review) -> RepoResult<()> {
        let Some(id) = review.id() else {
            return Ok(());
        };

        self.conn.execute("DELETE FROM reviews WHERE id = ?1;", [id])?;
        review.set_id(None);
        debug!("event=row_delete module=repo status=ok table=reviews id={id}");
        Ok(())
    }

    fn get_all(&self) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(&format!("{REVIEW_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut reviews = Vec::new();

        while let Some(row) = rows.next()? {
            reviews.push(parse_review_row(row)?);
        }

        Ok(reviews)
    }
}

fn parse_review_row(row: &Row<'_>) -> RepoResult<Review> {
    let id: ReviewId = row.get("id")?;
    let year: i64 = row.get("year")?;
    let summary: Option<String> = row.get("summary")?;
    let employee_id: EmployeeId = row.get("employee_id")?;

    Review::from_row(id, year, summary.unwrap_or_default(), employee_id).map_err(|err| {
        RepoError::InvalidData(format!("reviews row {id}: {err}"))
    })
}
