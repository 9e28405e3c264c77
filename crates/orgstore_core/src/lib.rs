//! Organization graph model with JSON persistence and referential-integrity
//! guards.
//!
//! Departments own employees; projects reference employees by id. The store
//! rebuilds those references after load, and the guards refuse removals that
//! would leave them dangling.

pub mod guard;
pub mod logging;
pub mod model;
pub mod store;

pub use guard::{can_remove_department, can_remove_employee, DependencyError};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::company::{Company, CompanyError, CompanyResult};
pub use model::department::{Department, DepartmentError};
pub use model::employee::{Employee, EmployeeId, EmployeeKind, Role, Seniority, SkillSet};
pub use model::project::{Project, ProjectId, ProjectStatus};
pub use model::validate::{ValidationError, ValidationResult};
pub use store::codec::{decode_employee, decode_fields, encode_employee};
pub use store::company_store::{load_from_json_with_report, LoadedCompany};
pub use store::department_store::{load_department_file, LoadedDepartment};
pub use store::factory::{create_employee, FactoryError};
pub use store::link_resolver::{build_employee_index, resolve_team, ResolvedTeam};
pub use store::{FieldMap, LoadReport, SkippedEmployee, StoreError, StoreResult, UnresolvedLink};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
