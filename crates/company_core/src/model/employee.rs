//! Employee domain model.
//!
//! # Invariants
//! - `id` is `None` before the first save and the storage-assigned rowid
//!   afterwards.
//! - No field rules are enforced for employees; `department_id` is only
//!   checked by the storage foreign key when `departments` exists.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned employee identifier (`employees.id`).
pub type EmployeeId = i64;

/// Identifier of a row in the externally managed `departments` table.
pub type DepartmentId = i64;

/// One row of the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<EmployeeId>,
    pub name: String,
    pub department_id: DepartmentId,
}

impl Employee {
    /// Creates an unsaved employee.
    pub fn new(name: impl Into<String>, department_id: DepartmentId) -> Self {
        Self {
            id: None,
            name: name.into(),
            department_id,
        }
    }

    /// Creates an employee bound to an existing row id.
    ///
    /// Saving it updates that row instead of inserting a new one.
    pub fn with_id(id: EmployeeId, name: impl Into<String>, department_id: DepartmentId) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            department_id,
        }
    }

    /// Returns whether this value is bound to a stored row.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Employee {id}: {}>", self.name),
            None => write!(f, "<Employee None: {}>", self.name),
        }
    }
}
