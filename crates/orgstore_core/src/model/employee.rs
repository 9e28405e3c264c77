//! Employee domain model.
//!
//! # Responsibility
//! - Define the common employee header (id, name, department, base salary).
//! - Define the closed set of role variants and their salary formulas.
//!
//! # Invariants
//! - `id` is the sole identity: equality and hashing only look at `id`.
//! - Every money field is finite and `>= 0`; commission rate is in `[0, 1]`.
//! - Developer skills keep insertion order and never hold duplicates.

use crate::model::validate::{
    normalize_department_label, validate_amount, validate_choice, validate_id, validate_name,
    validate_ratio, ValidationError, ValidationResult,
};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Company-wide employee identifier.
pub type EmployeeId = u64;

/// Type tag for ordinary employees.
pub const EMPLOYEE_TAG_ORDINARY: &str = "employee";
/// Type tag for managers.
pub const EMPLOYEE_TAG_MANAGER: &str = "manager";
/// Type tag for developers.
pub const EMPLOYEE_TAG_DEVELOPER: &str = "developer";
/// Type tag for salespeople.
pub const EMPLOYEE_TAG_SALESPERSON: &str = "salesperson";

const EMPLOYEE_TAGS: &[&str] = &[
    EMPLOYEE_TAG_ORDINARY,
    EMPLOYEE_TAG_MANAGER,
    EMPLOYEE_TAG_DEVELOPER,
    EMPLOYEE_TAG_SALESPERSON,
];

const SENIORITY_LEVELS: &[&str] = &["junior", "middle", "senior"];

/// Returns every employee type tag understood by the factory.
pub fn known_employee_tags() -> &'static [&'static str] {
    EMPLOYEE_TAGS
}

/// Discriminant of [`Role`], used as the persisted `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmployeeKind {
    Ordinary,
    Manager,
    Developer,
    Salesperson,
}

impl EmployeeKind {
    /// Stable tag written to the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordinary => EMPLOYEE_TAG_ORDINARY,
            Self::Manager => EMPLOYEE_TAG_MANAGER,
            Self::Developer => EMPLOYEE_TAG_DEVELOPER,
            Self::Salesperson => EMPLOYEE_TAG_SALESPERSON,
        }
    }

    /// Parses a tag, ignoring case and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            EMPLOYEE_TAG_ORDINARY => Some(Self::Ordinary),
            EMPLOYEE_TAG_MANAGER => Some(Self::Manager),
            EMPLOYEE_TAG_DEVELOPER => Some(Self::Developer),
            EMPLOYEE_TAG_SALESPERSON => Some(Self::Salesperson),
            _ => None,
        }
    }
}

/// Developer qualification level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Seniority {
    #[default]
    Junior,
    Middle,
    Senior,
}

impl Seniority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Middle => "middle",
            Self::Senior => "senior",
        }
    }

    /// Salary multiplier applied to the developer base salary.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Junior => 1.0,
            Self::Middle => 1.5,
            Self::Senior => 2.0,
        }
    }

    /// Parses `junior|middle|senior`, case-insensitive.
    pub fn parse(value: &str) -> ValidationResult<Self> {
        match validate_choice("seniority", value, SENIORITY_LEVELS)? {
            0 => Ok(Self::Junior),
            1 => Ok(Self::Middle),
            _ => Ok(Self::Senior),
        }
    }
}

/// Ordered, duplicate-free list of developer skills.
///
/// Duplicate detection is case-sensitive: `Rust` and `rust` are distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw names, trimming each one and dropping repeats.
    pub fn from_names<I, S>(names: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.add(name.as_ref())?;
        }
        Ok(set)
    }

    /// Adds one skill. Returns `false` when it was already present.
    pub fn add(&mut self, skill: &str) -> ValidationResult<bool> {
        let skill = validate_name("tech_stack", skill)?;
        if self.contains(&skill) {
            return Ok(false);
        }
        self.skills.push(skill);
        Ok(true)
    }

    /// Removes one skill. Returns `false` when it was absent.
    pub fn remove(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|existing| existing != skill.trim());
        self.skills.len() != before
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|existing| existing == skill.trim())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Role-specific employee data.
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    Ordinary,
    Manager {
        bonus: f64,
    },
    Developer {
        seniority: Seniority,
        skills: SkillSet,
    },
    Salesperson {
        sales_volume: f64,
        commission_rate: f64,
    },
}

impl Role {
    pub fn kind(&self) -> EmployeeKind {
        match self {
            Self::Ordinary => EmployeeKind::Ordinary,
            Self::Manager { .. } => EmployeeKind::Manager,
            Self::Developer { .. } => EmployeeKind::Developer,
            Self::Salesperson { .. } => EmployeeKind::Salesperson,
        }
    }

    /// Validates role-specific scalars.
    pub fn validate(&self) -> ValidationResult<()> {
        match self {
            Self::Ordinary | Self::Developer { .. } => Ok(()),
            Self::Manager { bonus } => validate_amount("bonus", *bonus).map(|_| ()),
            Self::Salesperson {
                sales_volume,
                commission_rate,
            } => {
                validate_amount("sales_volume", *sales_volume)?;
                validate_ratio("commission", *commission_rate)?;
                Ok(())
            }
        }
    }
}

/// Concrete employee: shared header plus one [`Role`].
#[derive(Debug, Clone)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    department: String,
    base_salary: f64,
    role: Role,
}

impl Employee {
    /// Builds an employee after validating every scalar field.
    ///
    /// No partially-constructed value escapes on failure.
    pub fn new(
        id: i64,
        name: &str,
        department: &str,
        base_salary: f64,
        role: Role,
    ) -> ValidationResult<Self> {
        let id = validate_id("id", id)?;
        let name = validate_name("name", name)?;
        let department = normalize_department_label(department);
        let base_salary = validate_amount("base_salary", base_salary)?;
        role.validate()?;
        Ok(Self {
            id,
            name,
            department,
            base_salary,
            role,
        })
    }

    pub fn ordinary(
        id: i64,
        name: &str,
        department: &str,
        base_salary: f64,
    ) -> ValidationResult<Self> {
        Self::new(id, name, department, base_salary, Role::Ordinary)
    }

    pub fn manager(
        id: i64,
        name: &str,
        department: &str,
        base_salary: f64,
        bonus: f64,
    ) -> ValidationResult<Self> {
        Self::new(id, name, department, base_salary, Role::Manager { bonus })
    }

    pub fn developer(
        id: i64,
        name: &str,
        department: &str,
        base_salary: f64,
        seniority: Seniority,
        skills: SkillSet,
    ) -> ValidationResult<Self> {
        Self::new(
            id,
            name,
            department,
            base_salary,
            Role::Developer { seniority, skills },
        )
    }

    pub fn salesperson(
        id: i64,
        name: &str,
        department: &str,
        base_salary: f64,
        commission_rate: f64,
        sales_volume: f64,
    ) -> ValidationResult<Self> {
        Self::new(
            id,
            name,
            department,
            base_salary,
            Role::Salesperson {
                sales_volume,
                commission_rate,
            },
        )
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn base_salary(&self) -> f64 {
        self.base_salary
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn kind(&self) -> EmployeeKind {
        self.role.kind()
    }

    /// Updates the base salary, rejecting negative or non-finite input.
    pub fn set_base_salary(&mut self, value: f64) -> ValidationResult<()> {
        self.base_salary = validate_amount("base_salary", value)?;
        Ok(())
    }

    /// Adds a skill to a developer. Non-developers reject the call.
    pub fn add_skill(&mut self, skill: &str) -> ValidationResult<bool> {
        match &mut self.role {
            Role::Developer { skills, .. } => skills.add(skill),
            _ => Err(ValidationError::WrongType {
                field: "tech_stack".to_string(),
                expected: "set only on developers",
            }),
        }
    }

    /// Removes a developer skill. Returns `false` when absent or not a developer.
    pub fn remove_skill(&mut self, skill: &str) -> bool {
        match &mut self.role {
            Role::Developer { skills, .. } => skills.remove(skill),
            _ => false,
        }
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        match &self.role {
            Role::Developer { skills, .. } => skills.contains(skill),
            _ => false,
        }
    }

    /// Monthly salary for this employee's role.
    pub fn calculate_salary(&self) -> f64 {
        match &self.role {
            Role::Ordinary => self.base_salary,
            Role::Manager { bonus } => self.base_salary + bonus,
            Role::Developer { seniority, .. } => self.base_salary * seniority.multiplier(),
            Role::Salesperson {
                sales_volume,
                commission_rate,
            } => self.base_salary + sales_volume * commission_rate,
        }
    }

    /// Orders by computed salary, lowest first.
    ///
    /// Independent of identity: two employees with different ids can compare
    /// `Equal` here.
    pub fn cmp_by_salary(&self, other: &Self) -> Ordering {
        self.calculate_salary().total_cmp(&other.calculate_salary())
    }

    /// One-line human-readable summary.
    pub fn describe(&self) -> String {
        let details = match &self.role {
            Role::Ordinary => String::new(),
            Role::Manager { bonus } => format!(", bonus {bonus:.2}"),
            Role::Developer { seniority, skills } => format!(
                ", level {}, stack [{}]",
                seniority.as_str(),
                skills.as_slice().join(", ")
            ),
            Role::Salesperson {
                sales_volume,
                commission_rate,
            } => format!(
                ", sales {sales_volume:.2}, commission {:.1}%",
                commission_rate * 100.0
            ),
        };
        format!(
            "{} #{} {} ({}): base {:.2}{}, salary {:.2}",
            self.kind().as_str(),
            self.id,
            self.name,
            self.department,
            self.base_salary,
            details,
            self.calculate_salary()
        )
    }
}

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Employee {}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::{Employee, EmployeeKind, Seniority, SkillSet};
    use std::cmp::Ordering;

    #[test]
    fn skills_dedupe_case_sensitively_and_reject_blank() {
        let mut skills = SkillSet::from_names(["Rust", " Rust ", "rust"]).unwrap();
        assert_eq!(skills.as_slice(), &["Rust".to_string(), "rust".to_string()]);
        assert!(skills.add("   ").is_err());
        assert!(skills.remove("rust"));
        assert!(!skills.remove("rust"));
        assert_eq!(skills.len(), 1);
    }

    #[test]
    fn skill_edits_only_apply_to_developers() {
        let mut dev =
            Employee::developer(1, "D", "IT", 100.0, Seniority::Junior, SkillSet::new()).unwrap();
        assert!(dev.add_skill("Go").unwrap());
        assert!(!dev.add_skill("Go").unwrap());
        assert!(dev.has_skill("Go"));
        assert!(dev.remove_skill("Go"));
        assert!(!dev.has_skill("Go"));

        let mut plain = Employee::ordinary(2, "P", "IT", 100.0).unwrap();
        assert!(plain.add_skill("Go").is_err());
        assert!(!plain.remove_skill("Go"));
    }

    #[test]
    fn kind_tags_parse_loosely() {
        assert_eq!(EmployeeKind::from_tag(" SalesPerson "), Some(EmployeeKind::Salesperson));
        assert_eq!(EmployeeKind::from_tag("intern"), None);
        assert_eq!(Seniority::parse("Senior").unwrap(), Seniority::Senior);
    }

    #[test]
    fn describe_mentions_role_details() {
        let manager = Employee::manager(7, "Alice", "Board", 5000.0, 1000.0).unwrap();
        let text = manager.describe();
        assert!(text.starts_with("manager #7 Alice (Board)"));
        assert!(text.contains("bonus 1000.00"));
        assert!(text.ends_with("salary 6000.00"));
        assert_eq!(manager.to_string(), text);
    }

    #[test]
    fn salary_ordering_uses_computed_salary() {
        let senior =
            Employee::developer(1, "S", "IT", 3000.0, Seniority::Senior, SkillSet::new()).unwrap();
        let manager = Employee::manager(2, "M", "Board", 5000.0, 500.0).unwrap();
        let clerk = Employee::ordinary(3, "C", "Ops", 5500.0).unwrap();

        let mut staff = vec![&senior, &manager, &clerk];
        staff.sort_by(|a, b| a.cmp_by_salary(b));
        let ids: Vec<u64> = staff.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(manager.cmp_by_salary(&clerk), Ordering::Equal);
    }

    #[test]
    fn base_salary_updates_are_validated() {
        let mut clerk = Employee::ordinary(4, "C", "Ops", 100.0).unwrap();
        clerk.set_base_salary(250.0).unwrap();
        assert_eq!(clerk.calculate_salary(), 250.0);
        assert!(clerk.set_base_salary(-1.0).is_err());
        assert!(clerk.set_base_salary(f64::NAN).is_err());
        assert_eq!(clerk.base_salary(), 250.0);
    }

    #[test]
    fn identity_is_the_id() {
        let a = Employee::ordinary(3, "A", "X", 1.0).unwrap();
        let b = Employee::manager(3, "B", "Y", 2.0, 0.0).unwrap();
        assert_eq!(a, b);
    }
}
