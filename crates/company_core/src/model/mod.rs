//! Entity models mapped one-to-one onto table rows.
//!
//! # Responsibility
//! - Define the in-memory shape of employees and reviews.
//! - Own the scalar field rules for reviews.
//!
//! # Invariants
//! - An entity id is `None` until the row is first inserted.
//! - Entities are plain values: two fetches of one row are two values.

pub mod employee;
pub mod review;
