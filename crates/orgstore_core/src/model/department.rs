//! Department aggregate.
//!
//! # Responsibility
//! - Own an ordered list of employees.
//! - Provide lookups and salary aggregates over the owned employees.
//!
//! # Invariants
//! - Employee ids are unique within one department (checked on insert).
//! - Insertion order is preserved and is the persisted order.

use crate::model::employee::{Employee, EmployeeId, EmployeeKind};
use crate::model::validate::{validate_name, ValidationResult};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from department mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentError {
    /// The department already holds an employee with this id.
    DuplicateEmployee {
        department: String,
        employee_id: EmployeeId,
    },
}

impl Display for DepartmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmployee {
                department,
                employee_id,
            } => write!(
                f,
                "department `{department}` already has an employee with id {employee_id}"
            ),
        }
    }
}

impl Error for DepartmentError {}

/// Named group of employees owned by a company.
#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    name: String,
    employees: Vec<Employee>,
}

impl Department {
    /// Creates an empty department. The name must not be blank.
    pub fn new(name: &str) -> ValidationResult<Self> {
        Ok(Self {
            name: validate_name("department name", name)?,
            employees: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends an employee, rejecting an id already present here.
    pub fn add_employee(&mut self, employee: Employee) -> Result<(), DepartmentError> {
        if self.contains(employee.id()) {
            return Err(DepartmentError::DuplicateEmployee {
                department: self.name.clone(),
                employee_id: employee.id(),
            });
        }
        self.employees.push(employee);
        Ok(())
    }

    /// Removes and returns the employee with `id`, if present.
    pub fn remove_employee(&mut self, id: EmployeeId) -> Option<Employee> {
        let position = self.employees.iter().position(|e| e.id() == id)?;
        Some(self.employees.remove(position))
    }

    pub fn find_employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.find_employee(id).is_some()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Employee> {
        self.employees.iter()
    }

    /// Employees whose name contains `needle`, ignoring case.
    pub fn find_employees_by_name(&self, needle: &str) -> Vec<&Employee> {
        let needle = needle.to_lowercase();
        self.employees
            .iter()
            .filter(|e| e.name().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn employees_of_kind(&self, kind: EmployeeKind) -> Vec<&Employee> {
        self.employees.iter().filter(|e| e.kind() == kind).collect()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Sum of computed salaries.
    pub fn total_salary(&self) -> f64 {
        self.employees.iter().map(Employee::calculate_salary).sum()
    }

    /// Mean computed salary, `0.0` for an empty department.
    pub fn average_salary(&self) -> f64 {
        if self.employees.is_empty() {
            return 0.0;
        }
        self.total_salary() / self.employees.len() as f64
    }

    /// Number of employees per role tag.
    pub fn headcount_by_kind(&self) -> BTreeMap<EmployeeKind, usize> {
        let mut counts = BTreeMap::new();
        for employee in &self.employees {
            *counts.entry(employee.kind()).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Department {
    type Item = &'a Employee;
    type IntoIter = std::slice::Iter<'a, Employee>;

    fn into_iter(self) -> Self::IntoIter {
        self.employees.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Department, DepartmentError};
    use crate::model::employee::{Employee, EmployeeKind};

    #[test]
    fn payroll_aggregates_use_computed_salaries() {
        let mut dept = Department::new(" Ops ").unwrap();
        assert_eq!(dept.name(), "Ops");
        assert_eq!(dept.average_salary(), 0.0);

        dept.add_employee(Employee::manager(1, "M", "Ops", 1000.0, 500.0).unwrap())
            .unwrap();
        dept.add_employee(Employee::ordinary(2, "O", "Ops", 500.0).unwrap())
            .unwrap();
        assert_eq!(dept.total_salary(), 2000.0);
        assert_eq!(dept.average_salary(), 1000.0);
        assert_eq!(dept.headcount_by_kind()[&EmployeeKind::Manager], 1);
        assert_eq!(dept.employees_of_kind(EmployeeKind::Ordinary).len(), 1);
    }

    #[test]
    fn duplicate_id_is_rejected_and_removal_returns_owner() {
        let mut dept = Department::new("Ops").unwrap();
        dept.add_employee(Employee::ordinary(1, "A", "Ops", 1.0).unwrap())
            .unwrap();
        let err = dept
            .add_employee(Employee::ordinary(1, "B", "Ops", 1.0).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            DepartmentError::DuplicateEmployee {
                department: "Ops".to_string(),
                employee_id: 1
            }
        );
        assert_eq!(dept.remove_employee(1).unwrap().name(), "A");
        assert!(dept.remove_employee(1).is_none());
    }

    #[test]
    fn name_search_is_case_insensitive_substring() {
        let mut dept = Department::new("IT").unwrap();
        for (id, name) in [(1, "Anna Smith"), (2, "JOHANNA"), (3, "Bob")] {
            dept.add_employee(Employee::ordinary(id, name, "IT", 1.0).unwrap())
                .unwrap();
        }

        let ids: Vec<u64> = dept
            .find_employees_by_name("anna")
            .iter()
            .map(|e| e.id())
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(dept.find_employees_by_name("zed").is_empty());
        assert_eq!(dept.find_employees_by_name("").len(), 3);
    }
}
