//! Project model with weak team references.
//!
//! # Responsibility
//! - Hold validated project identity, status and deadline.
//! - Record team membership as employee ids only.
//!
//! # Invariants
//! - A project never owns employees; `team_ids` is a relation resolved by
//!   lookup against the owning company.
//! - Team membership is idempotent and keeps insertion order.

use crate::model::employee::{Employee, EmployeeId};
use crate::model::validate::{
    validate_choice, validate_date, validate_id, validate_name, ValidationResult,
};
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Company-wide project identifier.
pub type ProjectId = u64;

const PROJECT_STATUSES: &[&str] = &["planning", "active", "completed", "cancelled"];

/// Returns every persisted project status value.
pub fn known_project_statuses() -> &'static [&'static str] {
    PROJECT_STATUSES
}

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> ValidationResult<Self> {
        match validate_choice("status", value, PROJECT_STATUSES)? {
            0 => Ok(Self::Planning),
            1 => Ok(Self::Active),
            2 => Ok(Self::Completed),
            _ => Ok(Self::Cancelled),
        }
    }
}

/// Company project referencing employees by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    deadline: NaiveDate,
    status: ProjectStatus,
    team_ids: Vec<EmployeeId>,
}

impl Project {
    /// Creates a project with an empty team.
    pub fn new(
        id: i64,
        name: &str,
        description: &str,
        deadline: NaiveDate,
        status: ProjectStatus,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id: validate_id("project id", id)?,
            name: validate_name("project name", name)?,
            description: description.to_string(),
            deadline,
            status,
            team_ids: Vec::new(),
        })
    }

    /// Creates a project from textual deadline and status, as read from disk.
    pub fn parse(
        id: i64,
        name: &str,
        description: &str,
        deadline: &str,
        status: &str,
    ) -> ValidationResult<Self> {
        let status = ProjectStatus::parse(status)?;
        let deadline = validate_date("deadline", deadline)?;
        Self::new(id, name, description, deadline, status)
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }

    /// Records `employee` as a team member. Returns `false` if already present.
    pub fn add_team_member(&mut self, employee: &Employee) -> bool {
        self.add_team_member_id(employee.id())
    }

    pub(crate) fn add_team_member_id(&mut self, id: EmployeeId) -> bool {
        if self.is_member(id) {
            return false;
        }
        self.team_ids.push(id);
        true
    }

    /// Drops `id` from the team. Returns `false` if it was not a member.
    pub fn remove_team_member(&mut self, id: EmployeeId) -> bool {
        let before = self.team_ids.len();
        self.team_ids.retain(|member| *member != id);
        self.team_ids.len() != before
    }

    pub fn is_member(&self, id: EmployeeId) -> bool {
        self.team_ids.contains(&id)
    }

    pub fn team_ids(&self) -> &[EmployeeId] {
        &self.team_ids
    }

    pub fn team_size(&self) -> usize {
        self.team_ids.len()
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "project #{} {} [{}] due {} team={}",
            self.id,
            self.name,
            self.status.as_str(),
            self.deadline,
            self.team_ids.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{known_project_statuses, Project, ProjectStatus};
    use crate::model::employee::Employee;
    use crate::model::validate::ValidationError;

    #[test]
    fn parse_reads_textual_fields() {
        let project = Project::parse(3, "Apollo", "", " 2025-02-28 ", "ACTIVE").unwrap();
        assert_eq!(project.status(), ProjectStatus::Active);
        assert_eq!(project.deadline().to_string(), "2025-02-28");

        let err = Project::parse(3, "Apollo", "", "2025-02-30", "active").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
        let err = Project::parse(3, "Apollo", "", "2025-02-28", "paused").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownChoice { .. }));
    }

    #[test]
    fn every_known_status_parses_back() {
        for &value in known_project_statuses() {
            assert_eq!(ProjectStatus::parse(value).unwrap().as_str(), value);
        }
    }

    #[test]
    fn status_can_be_changed() {
        let mut project = Project::parse(2, "P", "", "2025-01-01", "planning").unwrap();
        project.set_status(ProjectStatus::Cancelled);
        assert_eq!(project.status(), ProjectStatus::Cancelled);
    }

    #[test]
    fn team_membership_is_idempotent() {
        let mut project = Project::parse(1, "P", "", "2025-01-01", "planning").unwrap();
        let ann = Employee::ordinary(5, "Ann", "IT", 1.0).unwrap();
        assert!(project.add_team_member(&ann));
        assert!(!project.add_team_member(&ann));
        assert_eq!(project.team_size(), 1);
        assert!(project.remove_team_member(5));
        assert!(!project.is_member(5));
    }
}
