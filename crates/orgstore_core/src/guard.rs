//! Pre-mutation dependency guards.
//!
//! # Responsibility
//! - Decide whether removing a department or an employee would orphan a
//!   reference held elsewhere in the company graph.
//!
//! # Invariants
//! - Guards are state-free and never mutate their inputs.
//! - Callers must run the guard before looking up or removing anything.

use crate::model::department::Department;
use crate::model::employee::EmployeeId;
use crate::model::project::Project;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Mutation blocked by live references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    /// Department still owns employees.
    DepartmentNotEmpty {
        department: String,
        employee_count: usize,
    },
    /// Employee is still on one or more project teams.
    EmployeeOnProjects {
        employee_id: EmployeeId,
        projects: Vec<String>,
    },
}

impl Display for DependencyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepartmentNotEmpty {
                department,
                employee_count,
            } => write!(
                f,
                "cannot remove department `{department}`: it still has {employee_count} employee(s); remove or move them first"
            ),
            Self::EmployeeOnProjects {
                employee_id,
                projects,
            } => write!(
                f,
                "cannot remove employee {employee_id}: still on project team(s) {}; remove them from those teams first",
                projects.join(", ")
            ),
        }
    }
}

impl Error for DependencyError {}

/// Fails iff `department` owns at least one employee.
pub fn can_remove_department(department: &Department) -> Result<(), DependencyError> {
    if department.is_empty() {
        return Ok(());
    }
    Err(DependencyError::DepartmentNotEmpty {
        department: department.name().to_string(),
        employee_count: department.len(),
    })
}

/// Fails iff any project team contains `employee_id`.
///
/// The error lists every blocking project name in project order.
pub fn can_remove_employee(
    employee_id: EmployeeId,
    projects: &[Project],
) -> Result<(), DependencyError> {
    let blocking: Vec<String> = projects
        .iter()
        .filter(|project| project.is_member(employee_id))
        .map(|project| project.name().to_string())
        .collect();

    if blocking.is_empty() {
        return Ok(());
    }
    Err(DependencyError::EmployeeOnProjects {
        employee_id,
        projects: blocking,
    })
}
