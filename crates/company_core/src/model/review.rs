//! Review domain model and field rules.
//!
//! # Responsibility
//! - Hold a performance review for one employee.
//! - Validate `year` and `summary` on every write.
//!
//! # Invariants
//! - `year >= MIN_REVIEW_YEAR`.
//! - `summary` is never empty or whitespace-only.
//! - `employee_id` resolved to a stored employee when it was assigned. The
//!   lookup needs a connection, so only `repo::review_repo` can construct a
//!   review or change its employee.
//!
//! # See also
//! - `crate::repo::review_repo`

use crate::model::employee::EmployeeId;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned review identifier (`reviews.id`).
pub type ReviewId = i64;

/// Earliest accepted review year.
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// A review field failed its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// `year` is earlier than [`MIN_REVIEW_YEAR`].
    YearBeforeMinimum { year: i64 },
    /// `summary` is empty after trimming whitespace.
    BlankSummary,
    /// No employee row with this id exists.
    UnknownEmployee(EmployeeId),
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearBeforeMinimum { year } => write!(
                f,
                "year must be greater than or equal to {MIN_REVIEW_YEAR}, got {year}"
            ),
            Self::BlankSummary => write!(f, "summary must be a non-empty string"),
            Self::UnknownEmployee(id) => {
                write!(f, "employee_id {id} does not reference an existing employee")
            }
        }
    }
}

impl Error for ReviewValidationError {}

/// Checks the `year` rule.
pub fn validate_year(year: i64) -> Result<(), ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::YearBeforeMinimum { year });
    }
    Ok(())
}

/// Checks the `summary` rule.
pub fn validate_summary(summary: &str) -> Result<(), ReviewValidationError> {
    if summary.trim().is_empty() {
        return Err(ReviewValidationError::BlankSummary);
    }
    Ok(())
}

/// One row of the `reviews` table.
///
/// Fields are private so every write goes through a validating setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

impl Review {
    /// Builds an unsaved review. The caller has already confirmed that
    /// `employee_id` exists.
    pub(crate) fn new(
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
    ) -> Result<Self, ReviewValidationError> {
        let summary = summary.into();
        validate_year(year)?;
        validate_summary(&summary)?;
        Ok(Self {
            id: None,
            year,
            summary,
            employee_id,
        })
    }

    /// Hydrates a stored row, re-checking the scalar rules.
    pub(crate) fn from_row(
        id: ReviewId,
        year: i64,
        summary: String,
        employee_id: EmployeeId,
    ) -> Result<Self, ReviewValidationError> {
        let mut review = Self::new(year, summary, employee_id)?;
        review.id = Some(id);
        Ok(review)
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns whether this value is bound to a stored row.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Sets `year`; leaves the review unchanged on failure.
    pub fn set_year(&mut self, year: i64) -> Result<(), ReviewValidationError> {
        validate_year(year)?;
        self.year = year;
        Ok(())
    }

    /// Sets `summary`; leaves the review unchanged on failure.
    ///
    /// The text is stored as given, surrounding whitespace included.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ReviewValidationError> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    /// Assigns an employee whose existence the caller has confirmed.
    pub(crate) fn set_employee_id_checked(&mut self, employee_id: EmployeeId) {
        self.employee_id = employee_id;
    }

    pub(crate) fn set_id(&mut self, id: Option<ReviewId>) {
        self.id = id;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Review {id}: {} - {}>", self.year, self.summary),
            None => write!(f, "<Review None: {} - {}>", self.year, self.summary),
        }
    }
}
