//! Company aggregate root.
//!
//! # Responsibility
//! - Own departments and projects and keep cross-entity invariants.
//! - Route destructive mutations through dependency guards.
//!
//! # Invariants
//! - Department names are unique within the company.
//! - Project ids are unique within the company.
//! - Employee ids are unique across all departments.
//! - Every project team id resolves to an employee of this company.

use crate::guard::{can_remove_department, can_remove_employee, DependencyError};
use crate::model::department::{Department, DepartmentError};
use crate::model::employee::{Employee, EmployeeId};
use crate::model::project::{Project, ProjectId};
use crate::model::validate::{validate_name, ValidationResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CompanyResult<T> = Result<T, CompanyError>;

/// Errors from company-level mutations and lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyError {
    DuplicateDepartment(String),
    DepartmentNotFound(String),
    DuplicateProject(ProjectId),
    ProjectNotFound(ProjectId),
    EmployeeNotFound(EmployeeId),
    /// Employee id already used by a department of this company.
    DuplicateEmployee {
        employee_id: EmployeeId,
        department: String,
    },
    /// Project team references an id no department holds.
    UnknownTeamMember {
        project_id: ProjectId,
        employee_id: EmployeeId,
    },
    /// Removal blocked by live references.
    Dependency(DependencyError),
}

impl Display for CompanyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDepartment(name) => write!(f, "department `{name}` already exists"),
            Self::DepartmentNotFound(name) => write!(f, "department `{name}` not found"),
            Self::DuplicateProject(id) => write!(f, "project with id {id} already exists"),
            Self::ProjectNotFound(id) => write!(f, "project with id {id} not found"),
            Self::EmployeeNotFound(id) => write!(f, "employee with id {id} not found"),
            Self::DuplicateEmployee {
                employee_id,
                department,
            } => write!(
                f,
                "employee id {employee_id} is already used in department `{department}`"
            ),
            Self::UnknownTeamMember {
                project_id,
                employee_id,
            } => write!(
                f,
                "project {project_id} references unknown employee {employee_id}"
            ),
            Self::Dependency(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CompanyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dependency(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DependencyError> for CompanyError {
    fn from(value: DependencyError) -> Self {
        Self::Dependency(value)
    }
}

impl From<DepartmentError> for CompanyError {
    fn from(value: DepartmentError) -> Self {
        match value {
            DepartmentError::DuplicateEmployee {
                department,
                employee_id,
            } => Self::DuplicateEmployee {
                employee_id,
                department,
            },
        }
    }
}

/// Organization graph: departments own employees, projects reference them.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    name: String,
    departments: Vec<Department>,
    projects: Vec<Project>,
}

impl Company {
    pub fn new(name: &str) -> ValidationResult<Self> {
        Ok(Self {
            name: validate_name("company name", name)?,
            departments: Vec::new(),
            projects: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name() == name)
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == id)
    }

    /// Adds a department.
    ///
    /// Rejects a duplicate name, and any employee id already owned by
    /// another department.
    pub fn add_department(&mut self, department: Department) -> CompanyResult<()> {
        if self.department(department.name()).is_some() {
            return Err(CompanyError::DuplicateDepartment(
                department.name().to_string(),
            ));
        }
        for employee in department.employees() {
            self.ensure_employee_id_free(employee.id())?;
        }
        self.departments.push(department);
        Ok(())
    }

    /// Hires `employee` into an existing department.
    pub fn add_employee(&mut self, department: &str, employee: Employee) -> CompanyResult<()> {
        self.ensure_employee_id_free(employee.id())?;
        let target = self
            .departments
            .iter_mut()
            .find(|d| d.name() == department)
            .ok_or_else(|| CompanyError::DepartmentNotFound(department.to_string()))?;
        target.add_employee(employee)?;
        Ok(())
    }

    /// Adds a project whose team ids all resolve inside this company.
    pub fn add_project(&mut self, project: Project) -> CompanyResult<()> {
        if self.project(project.id()).is_some() {
            return Err(CompanyError::DuplicateProject(project.id()));
        }
        if let Some(missing) = project
            .team_ids()
            .iter()
            .copied()
            .find(|id| self.employee(*id).is_none())
        {
            return Err(CompanyError::UnknownTeamMember {
                project_id: project.id(),
                employee_id: missing,
            });
        }
        self.projects.push(project);
        Ok(())
    }

    /// Removes a project. Projects hold no owning references, so no guard applies.
    pub fn remove_project(&mut self, id: ProjectId) -> CompanyResult<Project> {
        let position = self
            .projects
            .iter()
            .position(|p| p.id() == id)
            .ok_or(CompanyError::ProjectNotFound(id))?;
        Ok(self.projects.remove(position))
    }

    /// Puts an existing employee on an existing project's team.
    pub fn assign_to_project(
        &mut self,
        project_id: ProjectId,
        employee_id: EmployeeId,
    ) -> CompanyResult<bool> {
        if self.employee(employee_id).is_none() {
            return Err(CompanyError::EmployeeNotFound(employee_id));
        }
        let project = self.project_mut(project_id)?;
        Ok(project.add_team_member_id(employee_id))
    }

    /// Takes an employee off a project's team.
    pub fn unassign_from_project(
        &mut self,
        project_id: ProjectId,
        employee_id: EmployeeId,
    ) -> CompanyResult<bool> {
        let project = self.project_mut(project_id)?;
        Ok(project.remove_team_member(employee_id))
    }

    /// Removes an empty department.
    ///
    /// Fails with [`CompanyError::Dependency`] while it still owns employees.
    pub fn remove_department(&mut self, name: &str) -> CompanyResult<Department> {
        let position = self
            .departments
            .iter()
            .position(|d| d.name() == name)
            .ok_or_else(|| CompanyError::DepartmentNotFound(name.to_string()))?;
        can_remove_department(&self.departments[position])?;
        Ok(self.departments.remove(position))
    }

    /// Removes an employee from whichever department owns it.
    ///
    /// The project guard runs before the employee is even looked up.
    pub fn remove_employee(&mut self, id: EmployeeId) -> CompanyResult<Employee> {
        can_remove_employee(id, &self.projects)?;
        self.departments
            .iter_mut()
            .find_map(|d| d.remove_employee(id))
            .ok_or(CompanyError::EmployeeNotFound(id))
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.departments.iter().find_map(|d| d.find_employee(id))
    }

    /// Department that currently owns employee `id`.
    pub fn department_of(&self, id: EmployeeId) -> Option<&Department> {
        self.departments.iter().find(|d| d.contains(id))
    }

    /// Every employee, department by department.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.departments.iter().flat_map(|d| d.employees().iter())
    }

    /// Resolves a project's team ids to live employees.
    pub fn project_team(&self, project_id: ProjectId) -> CompanyResult<Vec<&Employee>> {
        let project = self
            .project(project_id)
            .ok_or(CompanyError::ProjectNotFound(project_id))?;
        Ok(project
            .team_ids()
            .iter()
            .filter_map(|id| self.employee(*id))
            .collect())
    }

    /// Sum of every department's salaries.
    pub fn total_monthly_cost(&self) -> f64 {
        self.departments.iter().map(Department::total_salary).sum()
    }

    /// Salary totals per department, in department order.
    pub fn department_budgets(&self) -> Vec<(String, f64)> {
        self.departments
            .iter()
            .map(|d| (d.name().to_string(), d.total_salary()))
            .collect()
    }

    /// Salary total of one project's team.
    pub fn project_budget(&self, project_id: ProjectId) -> CompanyResult<f64> {
        Ok(self
            .project_team(project_id)?
            .into_iter()
            .map(Employee::calculate_salary)
            .sum())
    }

    /// Salary totals per project name, in project order.
    pub fn project_budgets(&self) -> Vec<(String, f64)> {
        self.projects
            .iter()
            .map(|p| {
                let total: f64 = p
                    .team_ids()
                    .iter()
                    .filter_map(|id| self.employee(*id))
                    .map(Employee::calculate_salary)
                    .sum();
                (p.name().to_string(), total)
            })
            .collect()
    }

    /// Mean salary of one project's team, `0.0` for an empty team.
    pub fn project_average_salary(&self, project_id: ProjectId) -> CompanyResult<f64> {
        let team = self.project_team(project_id)?;
        if team.is_empty() {
            return Ok(0.0);
        }
        let total: f64 = team.iter().map(|e| e.calculate_salary()).sum();
        Ok(total / team.len() as f64)
    }

    fn project_mut(&mut self, id: ProjectId) -> CompanyResult<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(CompanyError::ProjectNotFound(id))
    }

    fn ensure_employee_id_free(&self, id: EmployeeId) -> CompanyResult<()> {
        match self.department_of(id) {
            Some(owner) => Err(CompanyError::DuplicateEmployee {
                employee_id: id,
                department: owner.name().to_string(),
            }),
            None => Ok(()),
        }
    }
}
