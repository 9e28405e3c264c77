//! Department persistence unit.
//!
//! # Responsibility
//! - Encode one department as `{name, employees: [...]}`.
//! - Rebuild a department entry by entry, skipping malformed employees.
//!
//! # Invariants
//! - A bad employee entry is logged and reported, never fatal.
//! - An employee id seen earlier in the same load is skipped, so the loaded
//!   graph never holds two employees with one id.

use crate::model::department::Department;
use crate::model::employee::EmployeeId;
use crate::store::codec::{decode_employee, encode_employee};
use crate::store::{
    parse_document, read_source, write_json_atomic, SkippedEmployee, StoreError, StoreResult,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// On-disk shape of one department.
///
/// `department_name` is accepted on read for files written by older tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    #[serde(alias = "department_name")]
    pub name: String,
    #[serde(default)]
    pub employees: Vec<Value>,
}

/// Department rebuilt from a record plus the entries that were dropped.
#[derive(Debug, Clone)]
pub struct LoadedDepartment {
    pub department: Department,
    pub skipped: Vec<SkippedEmployee>,
}

/// Encodes a department and all of its employees.
pub fn save_department(department: &Department) -> DepartmentRecord {
    DepartmentRecord {
        name: department.name().to_string(),
        employees: department
            .employees()
            .iter()
            .map(|employee| Value::Object(encode_employee(employee)))
            .collect(),
    }
}

/// Rebuilds a department from its record.
///
/// # Errors
/// - Returns [`StoreError::InvalidDepartment`] when the name is blank.
pub fn load_department(record: &DepartmentRecord) -> StoreResult<LoadedDepartment> {
    let mut claimed = HashMap::new();
    materialize_department(record, &mut claimed)
}

/// Rebuilds a department, treating ids already in `claimed` as collisions.
///
/// Every accepted employee id is added to `claimed` with the owning
/// department name.
pub(crate) fn materialize_department(
    record: &DepartmentRecord,
    claimed: &mut HashMap<EmployeeId, String>,
) -> StoreResult<LoadedDepartment> {
    let mut department =
        Department::new(&record.name).map_err(|source| StoreError::InvalidDepartment {
            name: record.name.clone(),
            source,
        })?;
    let mut skipped = Vec::new();

    for (position, entry) in record.employees.iter().enumerate() {
        let reason = match decode_employee(entry) {
            Ok(employee) => match claimed.get(&employee.id()) {
                Some(owner) => format!(
                    "employee id {} is already used in department `{owner}`",
                    employee.id()
                ),
                None => {
                    let id = employee.id();
                    match department.add_employee(employee) {
                        Ok(()) => {
                            claimed.insert(id, department.name().to_string());
                            continue;
                        }
                        Err(err) => err.to_string(),
                    }
                }
            },
            Err(err) => err.to_string(),
        };

        warn!(
            "event=employee_skip module=store status=skipped department={} position={} reason={}",
            department.name(),
            position,
            reason
        );
        skipped.push(SkippedEmployee {
            department: department.name().to_string(),
            position,
            reason,
        });
    }

    Ok(LoadedDepartment {
        department,
        skipped,
    })
}

/// Reads a standalone department file.
pub fn load_department_file(path: impl AsRef<Path>) -> StoreResult<LoadedDepartment> {
    let path = path.as_ref();
    let raw = read_source(path)?;
    let record: DepartmentRecord = parse_document(path, &raw)?;
    let loaded = load_department(&record)?;
    info!(
        "event=department_load module=store status=ok path={} employees={} skipped={}",
        path.display(),
        loaded.department.len(),
        loaded.skipped.len()
    );
    Ok(loaded)
}

impl Department {
    /// Writes this department to `path` as a standalone JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        write_json_atomic(path, &save_department(self))?;
        info!(
            "event=department_save module=store status=ok path={} employees={}",
            path.display(),
            self.len()
        );
        Ok(())
    }

    /// Loads a department file, dropping malformed employee entries.
    pub fn load_from_file(path: impl AsRef<Path>) -> StoreResult<Department> {
        load_department_file(path).map(|loaded| loaded.department)
    }
}
