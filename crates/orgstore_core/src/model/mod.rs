//! Organization domain model.
//!
//! # Responsibility
//! - Define employees, departments, projects and the company aggregate.
//! - Keep scalar validation and ownership invariants inside constructors and
//!   mutators, independent of any storage format.
//!
//! # Invariants
//! - Departments own employees exclusively; projects only record employee ids.
//! - Employee identity is the numeric `id`, unique across one company.

pub mod company;
pub mod department;
pub mod employee;
pub mod project;
pub mod validate;
