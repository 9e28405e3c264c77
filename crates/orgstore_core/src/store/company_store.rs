//! Whole-company persistence.
//!
//! # Responsibility
//! - Save the full graph to one JSON document.
//! - Load it back in two passes: materialize every department first, then
//!   rebuild project teams against an index of the loaded employees.
//!
//! # Invariants
//! - Project status outside the allowed set aborts the load.
//! - Team ids that match no loaded employee are dropped, logged and reported.
//! - Saving replaces the target file atomically.

use crate::model::company::Company;
use crate::model::department::Department;
use crate::model::employee::EmployeeId;
use crate::model::project::{Project, ProjectStatus};
use crate::model::validate::{validate_date, ValidationError, DATE_FORMAT};
use crate::store::department_store::{materialize_department, save_department, DepartmentRecord};
use crate::store::link_resolver::{build_employee_index, resolve_team};
use crate::store::{
    parse_document, read_source, write_json_atomic, LoadReport, StoreError, StoreResult,
    UnresolvedLink,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// On-disk shape of a whole company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub company_name: String,
    #[serde(default)]
    pub departments: Vec<DepartmentRecord>,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

/// On-disk shape of one project. Team members are stored by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub deadline: String,
    pub status: String,
    #[serde(default)]
    pub team_ids: Vec<i64>,
}

/// Company rebuilt from disk plus everything that was dropped on the way.
#[derive(Debug, Clone)]
pub struct LoadedCompany {
    pub company: Company,
    pub report: LoadReport,
}

/// Encodes the whole graph.
pub fn save_company(company: &Company) -> CompanyRecord {
    CompanyRecord {
        company_name: company.name().to_string(),
        departments: company.departments().iter().map(save_department).collect(),
        projects: company.projects().iter().map(save_project).collect(),
    }
}

fn save_project(project: &Project) -> ProjectRecord {
    ProjectRecord {
        id: project.id() as i64,
        name: project.name().to_string(),
        description: project.description().to_string(),
        deadline: project.deadline().format(DATE_FORMAT).to_string(),
        status: project.status().as_str().to_string(),
        team_ids: project.team_ids().iter().map(|id| *id as i64).collect(),
    }
}

/// Rebuilds a company from an already parsed record.
pub fn load_company(record: &CompanyRecord) -> StoreResult<LoadedCompany> {
    let mut company = Company::new(&record.company_name).map_err(StoreError::InvalidCompany)?;
    let mut report = LoadReport::default();

    let mut claimed: HashMap<EmployeeId, String> = HashMap::new();
    let mut departments: Vec<Department> = Vec::with_capacity(record.departments.len());
    for department_record in &record.departments {
        let loaded = materialize_department(department_record, &mut claimed)?;
        report.skipped_employees.extend(loaded.skipped);
        departments.push(loaded.department);
    }

    let mut projects = Vec::with_capacity(record.projects.len());
    {
        let index = build_employee_index(&departments);
        for project_record in &record.projects {
            let mut project = materialize_project(project_record)?;
            let team = resolve_team(&project_record.team_ids, &index);
            for member in team.members {
                project.add_team_member(member);
            }
            for employee_id in team.unresolved {
                warn!(
                    "event=link_unresolved module=store status=skipped project_id={} employee_id={}",
                    project.id(),
                    employee_id
                );
                report.unresolved_links.push(UnresolvedLink {
                    project_id: project.id(),
                    project_name: project.name().to_string(),
                    employee_id,
                });
            }
            projects.push(project);
        }
    }

    for department in departments {
        company.add_department(department)?;
    }
    for project in projects {
        company.add_project(project)?;
    }

    Ok(LoadedCompany { company, report })
}

fn materialize_project(record: &ProjectRecord) -> StoreResult<Project> {
    let status = ProjectStatus::parse(&record.status).map_err(|source| StoreError::InvalidStatus {
        project_id: record.id,
        value: record.status.clone(),
        source,
    })?;
    let invalid = |source: ValidationError| StoreError::InvalidProject {
        project_id: record.id,
        source,
    };
    let deadline = validate_date("deadline", &record.deadline).map_err(invalid)?;
    Project::new(
        record.id,
        &record.name,
        &record.description,
        deadline,
        status,
    )
    .map_err(invalid)
}

/// Loads a company file and returns the non-fatal findings with it.
///
/// # Errors
/// - [`StoreError::NotFound`] / [`StoreError::Io`] when the file cannot be read.
/// - [`StoreError::Malformed`] when it is not a company document.
/// - [`StoreError::InvalidStatus`] when any project status is unknown.
pub fn load_from_json_with_report(path: impl AsRef<Path>) -> StoreResult<LoadedCompany> {
    let path = path.as_ref();
    let raw = read_source(path)?;
    let record: CompanyRecord = parse_document(path, &raw)?;
    let loaded = load_company(&record)?;
    info!(
        "event=company_load module=store status=ok path={} departments={} projects={} skipped_employees={} unresolved_links={}",
        path.display(),
        loaded.company.departments().len(),
        loaded.company.projects().len(),
        loaded.report.skipped_employees.len(),
        loaded.report.unresolved_links.len()
    );
    Ok(loaded)
}

impl Company {
    /// Writes the whole graph to `path`, replacing any previous file atomically.
    pub fn save_to_json(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        write_json_atomic(path, &save_company(self))?;
        info!(
            "event=company_save module=store status=ok path={} departments={} projects={}",
            path.display(),
            self.departments().len(),
            self.projects().len()
        );
        Ok(())
    }

    /// Loads a company file. Use [`load_from_json_with_report`] to see what
    /// was skipped.
    pub fn load_from_json(path: impl AsRef<Path>) -> StoreResult<Company> {
        load_from_json_with_report(path).map(|loaded| loaded.company)
    }
}

#[cfg(test)]
mod tests {
    use super::{load_company, save_company, CompanyRecord};
    use crate::model::company::Company;
    use crate::model::department::Department;
    use crate::model::employee::Employee;
    use crate::model::project::{Project, ProjectStatus};
    use crate::store::StoreError;
    use chrono::NaiveDate;
    use serde_json::json;

    fn record(value: serde_json::Value) -> CompanyRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn projects_are_saved_with_ids_only() {
        let mut company = Company::new("Acme").unwrap();
        let mut it = Department::new("IT").unwrap();
        it.add_employee(Employee::ordinary(5, "Ann", "IT", 100.0).unwrap())
            .unwrap();
        company.add_department(it).unwrap();
        let deadline = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        company
            .add_project(Project::new(1, "Apollo", "", deadline, ProjectStatus::Active).unwrap())
            .unwrap();
        company.assign_to_project(1, 5).unwrap();

        let saved = serde_json::to_value(save_company(&company)).unwrap();
        assert_eq!(saved["projects"][0]["team_ids"], json!([5]));
        assert_eq!(saved["projects"][0]["deadline"], "2025-01-31");
        assert_eq!(saved["projects"][0]["status"], "active");
    }

    #[test]
    fn bad_deadline_is_an_invalid_project() {
        let err = load_company(&record(json!({
            "company_name": "Acme",
            "projects": [{"id": 1, "name": "P", "deadline": "31/01/2025", "status": "planning"}]
        })))
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidProject { project_id: 1, .. }));
    }

    #[test]
    fn duplicate_department_names_abort_the_load() {
        let err = load_company(&record(json!({
            "company_name": "Acme",
            "departments": [{"name": "IT"}, {"name": "IT"}]
        })))
        .unwrap_err();
        assert!(matches!(err, StoreError::Company(_)));
    }

    #[test]
    fn blank_company_name_is_rejected() {
        let err = load_company(&record(json!({"company_name": "  "}))).unwrap_err();
        assert!(matches!(err, StoreError::InvalidCompany(_)));
    }
}
