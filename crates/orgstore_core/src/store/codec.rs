//! Employee codec: concrete employee to flat tagged field map and back.
//!
//! # Invariants
//! - Encoded maps always carry `type` plus the four base fields, plus exactly
//!   the role's own fields (`bonus`; `seniority`, `tech_stack`;
//!   `commission`, `sales_volume`).
//! - Decoding goes through the factory, so `decode(encode(e))` yields an
//!   employee with the same id and the same computed salary.

use crate::model::employee::{Employee, Role};
use crate::store::factory::{
    create_employee_from_fields, FactoryError, FactoryResult, FIELD_BASE_SALARY, FIELD_BONUS,
    FIELD_COMMISSION, FIELD_DEPARTMENT, FIELD_ID, FIELD_NAME, FIELD_SALES_VOLUME,
    FIELD_SENIORITY, FIELD_TECH_STACK, FIELD_TYPE,
};
use crate::store::FieldMap;
use serde_json::{json, Value};

/// Encodes one employee as a tagged field map.
pub fn encode_employee(employee: &Employee) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert(FIELD_TYPE.to_string(), json!(employee.kind().as_str()));
    fields.insert(FIELD_ID.to_string(), json!(employee.id()));
    fields.insert(FIELD_NAME.to_string(), json!(employee.name()));
    fields.insert(FIELD_DEPARTMENT.to_string(), json!(employee.department()));
    fields.insert(FIELD_BASE_SALARY.to_string(), json!(employee.base_salary()));

    match employee.role() {
        Role::Ordinary => {}
        Role::Manager { bonus } => {
            fields.insert(FIELD_BONUS.to_string(), json!(bonus));
        }
        Role::Developer { seniority, skills } => {
            fields.insert(FIELD_SENIORITY.to_string(), json!(seniority.as_str()));
            fields.insert(FIELD_TECH_STACK.to_string(), json!(skills.as_slice()));
        }
        Role::Salesperson {
            sales_volume,
            commission_rate,
        } => {
            fields.insert(FIELD_COMMISSION.to_string(), json!(commission_rate));
            fields.insert(FIELD_SALES_VOLUME.to_string(), json!(sales_volume));
        }
    }
    fields
}

/// Decodes a tagged field map.
pub fn decode_fields(fields: &FieldMap) -> FactoryResult<Employee> {
    create_employee_from_fields(fields)
}

/// Decodes one raw JSON entry, rejecting non-object values.
pub fn decode_employee(value: &Value) -> FactoryResult<Employee> {
    let fields = value.as_object().ok_or(FactoryError::NotAnObject)?;
    decode_fields(fields)
}

#[cfg(test)]
mod tests {
    use super::{decode_employee, encode_employee};
    use crate::model::employee::{Employee, Seniority, SkillSet};
    use crate::store::factory::FactoryError;
    use serde_json::{json, Value};

    #[test]
    fn manager_encodes_only_its_own_fields() {
        let manager = Employee::manager(1, "Alice", "Board", 5000.0, 1200.0).unwrap();
        let fields = encode_employee(&manager);

        let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["base_salary", "bonus", "department", "id", "name", "type"]
        );
        assert_eq!(fields["type"], "manager");
        assert_eq!(fields["bonus"], 1200.0);
    }

    #[test]
    fn developer_tech_stack_is_an_ordered_array() {
        let skills = SkillSet::from_names(["Rust", "SQL", "Rust"]).unwrap();
        let dev = Employee::developer(2, "Bob", "IT", 4000.0, Seniority::Middle, skills).unwrap();
        let fields = encode_employee(&dev);

        assert_eq!(fields["seniority"], "middle");
        assert_eq!(fields["tech_stack"], json!(["Rust", "SQL"]));
    }

    #[test]
    fn salesperson_uses_commission_key() {
        let seller = Employee::salesperson(3, "Eve", "Sales", 4000.0, 0.1, 50000.0).unwrap();
        let fields = encode_employee(&seller);

        assert_eq!(fields["commission"], 0.1);
        assert_eq!(fields["sales_volume"], 50000.0);
        assert!(!fields.contains_key("commission_rate"));
    }

    #[test]
    fn decode_rejects_non_object_entries() {
        let err = decode_employee(&Value::from(42)).unwrap_err();
        assert_eq!(err, FactoryError::NotAnObject);
    }
}
