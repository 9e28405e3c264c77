//! Employee factory: tagged field map to concrete employee.
//!
//! # Responsibility
//! - Dispatch on the employee type tag with a closed `match`.
//! - Enforce required base fields and apply documented defaults for optional
//!   role fields.
//!
//! # Invariants
//! - Required for every tag: `id`, `name`, `department`, `base_salary`.
//! - Defaults: `bonus=0`, `seniority=junior`, `tech_stack=[]`,
//!   `commission=0`, `sales_volume=0`.
//! - All scalars pass model validation before construction; nothing partial
//!   is returned on failure.
//! - No registry state lives outside the call.

use crate::model::employee::{
    known_employee_tags, Employee, EmployeeKind, Role, Seniority, SkillSet,
};
use crate::model::validate::ValidationError;
use crate::store::FieldMap;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const FIELD_TYPE: &str = "type";
pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DEPARTMENT: &str = "department";
pub const FIELD_BASE_SALARY: &str = "base_salary";
pub const FIELD_BONUS: &str = "bonus";
pub const FIELD_SENIORITY: &str = "seniority";
pub const FIELD_TECH_STACK: &str = "tech_stack";
pub const FIELD_COMMISSION: &str = "commission";
/// Older files spelled the commission key out in full.
pub const FIELD_COMMISSION_LEGACY: &str = "commission_rate";
pub const FIELD_SALES_VOLUME: &str = "sales_volume";

const REQUIRED_BASE_FIELDS: &[&str] = &[FIELD_ID, FIELD_NAME, FIELD_DEPARTMENT, FIELD_BASE_SALARY];

pub type FactoryResult<T> = Result<T, FactoryError>;

/// Failure to construct one employee.
#[derive(Debug, Clone, PartialEq)]
pub enum FactoryError {
    /// Required field absent (or `null`).
    MissingField { field: &'static str, tag: String },
    /// Type tag not in the closed set.
    UnknownType {
        tag: String,
        known: &'static [&'static str],
    },
    /// A present field failed validation.
    Validation(ValidationError),
    /// Entry is not a JSON object.
    NotAnObject,
}

impl Display for FactoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field, tag } => write!(
                f,
                "missing required field `{field}` for employee type `{tag}`"
            ),
            Self::UnknownType { tag, known } => write!(
                f,
                "unknown employee type `{tag}`; known types: {}",
                known.join(", ")
            ),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotAnObject => write!(f, "employee entry must be a JSON object"),
        }
    }
}

impl Error for FactoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for FactoryError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Builds the employee variant named by `type_tag` from `fields`.
///
/// The tag is matched case-insensitively; any `type` key inside `fields` is
/// ignored in favour of the explicit tag.
pub fn create_employee(type_tag: &str, fields: &FieldMap) -> FactoryResult<Employee> {
    let kind = EmployeeKind::from_tag(type_tag).ok_or_else(|| FactoryError::UnknownType {
        tag: type_tag.to_string(),
        known: known_employee_tags(),
    })?;
    let tag = kind.as_str();

    for &field in REQUIRED_BASE_FIELDS {
        if is_absent(fields, field) {
            return Err(FactoryError::MissingField {
                field,
                tag: tag.to_string(),
            });
        }
    }

    let id = integer_field(fields, FIELD_ID)?;
    let name = text_field(fields, FIELD_NAME)?;
    let department = text_field(fields, FIELD_DEPARTMENT)?;
    let base_salary = number_field(fields, FIELD_BASE_SALARY)?;

    let role = match kind {
        EmployeeKind::Ordinary => Role::Ordinary,
        EmployeeKind::Manager => Role::Manager {
            bonus: optional_number(fields, FIELD_BONUS)?.unwrap_or(0.0),
        },
        EmployeeKind::Developer => Role::Developer {
            seniority: match optional_text(fields, FIELD_SENIORITY)? {
                Some(value) => Seniority::parse(value)?,
                None => Seniority::Junior,
            },
            skills: skill_field(fields)?,
        },
        EmployeeKind::Salesperson => {
            let commission = match optional_number(fields, FIELD_COMMISSION)? {
                Some(value) => Some(value),
                None => optional_number(fields, FIELD_COMMISSION_LEGACY)?,
            };
            Role::Salesperson {
                sales_volume: optional_number(fields, FIELD_SALES_VOLUME)?.unwrap_or(0.0),
                commission_rate: commission.unwrap_or(0.0),
            }
        }
    };

    Ok(Employee::new(id, name, department, base_salary, role)?)
}

/// Builds an employee whose tag is carried in the `type` field.
pub fn create_employee_from_fields(fields: &FieldMap) -> FactoryResult<Employee> {
    let tag = match fields.get(FIELD_TYPE) {
        None | Some(Value::Null) => {
            return Err(FactoryError::MissingField {
                field: FIELD_TYPE,
                tag: "<untagged>".to_string(),
            })
        }
        Some(Value::String(tag)) => tag.as_str(),
        Some(_) => return Err(wrong_type(FIELD_TYPE, "a string").into()),
    };
    create_employee(tag, fields)
}

fn is_absent(fields: &FieldMap, key: &str) -> bool {
    matches!(fields.get(key), None | Some(Value::Null))
}

fn wrong_type(field: &str, expected: &'static str) -> ValidationError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected,
    }
}

fn integer_field(fields: &FieldMap, key: &'static str) -> FactoryResult<i64> {
    fields
        .get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| wrong_type(key, "an integer").into())
}

fn text_field<'a>(fields: &'a FieldMap, key: &'static str) -> FactoryResult<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| wrong_type(key, "a string").into())
}

fn number_field(fields: &FieldMap, key: &'static str) -> FactoryResult<f64> {
    fields
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| wrong_type(key, "a number").into())
}

fn optional_number(fields: &FieldMap, key: &'static str) -> FactoryResult<Option<f64>> {
    if is_absent(fields, key) {
        return Ok(None);
    }
    number_field(fields, key).map(Some)
}

fn optional_text<'a>(fields: &'a FieldMap, key: &'static str) -> FactoryResult<Option<&'a str>> {
    if is_absent(fields, key) {
        return Ok(None);
    }
    text_field(fields, key).map(Some)
}

fn skill_field(fields: &FieldMap) -> FactoryResult<SkillSet> {
    let items = match fields.get(FIELD_TECH_STACK) {
        None | Some(Value::Null) => return Ok(SkillSet::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(wrong_type(FIELD_TECH_STACK, "an array of strings").into()),
    };
    let mut names = Vec::with_capacity(items.len());
    for item in items {
        let name = item
            .as_str()
            .ok_or_else(|| wrong_type(FIELD_TECH_STACK, "an array of strings"))?;
        names.push(name);
    }
    Ok(SkillSet::from_names(names)?)
}
