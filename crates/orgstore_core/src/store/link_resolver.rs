//! Link resolution from stored employee ids to live employees.
//!
//! # Invariants
//! - The index is transient: built per load from materialized departments,
//!   never persisted or cached.
//! - On id collision the later department wins. Company loading skips
//!   colliding employees before indexing, so this only matters for callers
//!   indexing arbitrary department lists.
//! - Unknown ids are reported, never fatal.

use crate::model::department::Department;
use crate::model::employee::{Employee, EmployeeId};
use std::collections::HashMap;

/// Borrowed id to employee lookup table.
pub type EmployeeIndex<'a> = HashMap<EmployeeId, &'a Employee>;

/// Outcome of resolving one stored team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTeam<'a> {
    /// Resolved members in stored order, without repeats.
    pub members: Vec<&'a Employee>,
    /// Stored ids with no matching employee, in stored order.
    pub unresolved: Vec<i64>,
}

/// Flattens every department's employees into one index keyed by id.
pub fn build_employee_index(departments: &[Department]) -> EmployeeIndex<'_> {
    let mut index = HashMap::new();
    for department in departments {
        for employee in department.employees() {
            index.insert(employee.id(), employee);
        }
    }
    index
}

/// Resolves stored team ids against `index`.
///
/// Negative or zero ids can never match and are reported as unresolved.
pub fn resolve_team<'a>(ids: &[i64], index: &EmployeeIndex<'a>) -> ResolvedTeam<'a> {
    let mut members: Vec<&'a Employee> = Vec::with_capacity(ids.len());
    let mut unresolved = Vec::new();

    for &raw_id in ids {
        let found = u64::try_from(raw_id)
            .ok()
            .and_then(|id| index.get(&id).copied());
        match found {
            Some(employee) if !members.iter().any(|m| m.id() == employee.id()) => {
                members.push(employee)
            }
            Some(_) => {}
            None => unresolved.push(raw_id),
        }
    }

    ResolvedTeam {
        members,
        unresolved,
    }
}
