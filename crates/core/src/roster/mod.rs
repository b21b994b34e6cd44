//! Roster engines and the facade that composes them.
//!
//! The consistency engine guards referential integrity for mutations, the
//! query engine derives relationship views from per-teacher reads, and
//! [`RosterService`] is the single entry point callers use.

mod consistency;
mod error;
mod facade;
mod queries;
mod types;
pub mod validation;

pub use consistency::ConsistencyEngine;
pub use error::{roster_error_to_status_code, RosterError};
pub use facade::RosterService;
pub use queries::QueryEngine;
pub use types::{Registration, Student, Teacher, TeacherWithStudents};

#[cfg(test)]
pub(crate) mod testutil;
