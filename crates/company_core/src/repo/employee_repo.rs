//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Manage the `employees` table lifecycle.
//! - Insert-or-update, fetch, enumerate and delete employee rows.
//!
//! # Invariants
//! - `save` inserts when `id` is `None` and captures the assigned rowid.
//! - `delete` resets the in-memory id, so a later `save` inserts a new row.
//! - No field rules; an unknown `department_id` is only rejected by the
//!   storage foreign key.

use crate::model::employee::{DepartmentId, Employee, EmployeeId};
use crate::repo::{RepoError, RepoResult};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT id, name, department_id FROM employees";

/// Repository interface for employee persistence.
pub trait EmployeeRepository {
    /// Creates the `employees` table if it does not exist.
    fn create_table(&self) -> RepoResult<()>;
    /// Drops the `employees` table if it exists.
    fn drop_table(&self) -> RepoResult<()>;
    /// Inserts an unsaved employee or updates the row its id points at.
    fn save(&self, employee: &mut Employee) -> RepoResult<()>;
    /// Fetches one employee, `None` when no row matches.
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Returns whether a row with this id exists.
    fn exists(&self, id: EmployeeId) -> RepoResult<bool>;
    /// Deletes the stored row and clears the in-memory id.
    fn delete(&self, employee: &mut Employee) -> RepoResult<()>;
    /// Returns every stored employee in storage order.
    fn get_all(&self) -> RepoResult<Vec<Employee>>;

    /// Builds an employee and saves it in one step.
    fn create(&self, name: &str, department_id: DepartmentId) -> RepoResult<Employee> {
        let mut employee = Employee::new(name, department_id);
        self.save(&mut employee)?;
        Ok(employee)
    }

    /// Replaces both fields, then saves.
    fn update(
        &self,
        employee: &mut Employee,
        name: &str,
        department_id: DepartmentId,
    ) -> RepoResult<()> {
        employee.name = name.to_string();
        employee.department_id = department_id;
        self.save(employee)
    }
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY,
                name TEXT,
                department_id INTEGER,
                FOREIGN KEY (department_id) REFERENCES departments(id)
            );",
        )?;
        info!("event=table_create module=repo status=ok table=employees");
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS employees;")?;
        info!("event=table_drop module=repo status=ok table=employees");
        Ok(())
    }

    fn save(&self, employee: &mut Employee) -> RepoResult<()> {
        match employee.id {
            None => {
                self.conn.execute(
                    "INSERT INTO employees (name, department_id) VALUES (?1, ?2);",
                    params![employee.name.as_str(), employee.department_id],
                )?;
                let id = self.conn.last_insert_rowid();
                employee.id = Some(id);
                debug!("event=row_insert module=repo status=ok table=employees id={id}");
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE employees
                     SET name = ?1, department_id = ?2
                     WHERE id = ?3;",
                    params![employee.name.as_str(), employee.department_id, id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "employee",
                        id,
                    });
                }
                debug!("event=row_update module=repo status=ok table=employees id={id}");
            }
        }

        Ok(())
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_employee_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn exists(&self, id: EmployeeId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn delete(&self, employee: &mut Employee) -> RepoResult<()> {
        let Some(id) = employee.id else {
            return Ok(());
        };

        self.conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        employee.id = None;
        debug!("event=row_delete module=repo status=ok table=employees id={id}");
        Ok(())
    }

    fn get_all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!("{EMPLOYEE_SELECT_SQL};"))?;
        let employees = stmt
            .query_map([], parse_employee_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(employees)
    }
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee::with_id(
        row.get::<_, EmployeeId>("id")?,
        row.get::<_, String>("name")?,
        row.get::<_, DepartmentId>("department_id")?,
    ))
}
