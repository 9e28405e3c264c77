use orgstore_core::{
    create_employee, decode_employee, encode_employee, EmployeeKind, FactoryError, FieldMap,
    Role, Seniority, ValidationError,
};
use serde_json::json;

fn fields(value: serde_json::Value) -> FieldMap {
    value.as_object().cloned().unwrap()
}

#[test]
fn manager_without_bonus_defaults_to_zero() {
    let base = fields(json!({
        "id": 1, "name": "Alice", "department": "Board", "base_salary": 5000
    }));
    let manager = create_employee("manager", &base).unwrap();

    assert_eq!(manager.kind(), EmployeeKind::Manager);
    assert_eq!(manager.role(), &Role::Manager { bonus: 0.0 });
    assert_eq!(manager.calculate_salary(), 5000.0);
}

#[test]
fn unknown_type_lists_known_types() {
    let base = fields(json!({"id": 1, "name": "X", "department": "D", "base_salary": 1}));
    let err = create_employee("contractor", &base).unwrap_err();

    match &err {
        FactoryError::UnknownType { tag, known } => {
            assert_eq!(tag, "contractor");
            assert_eq!(
                *known,
                &["employee", "manager", "developer", "salesperson"][..]
            );
        }
        other => panic!("unexpected error {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("contractor"));
    assert!(message.contains("salesperson"));
}

#[test]
fn unknown_type_is_reported_before_missing_fields() {
    let err = create_employee("intern", &FieldMap::new()).unwrap_err();
    assert!(matches!(err, FactoryError::UnknownType { .. }));
}

#[test]
fn missing_base_field_names_the_field() {
    let base = fields(json!({"id": 1, "name": "X", "department": "D"}));
    let err = create_employee("salesperson", &base).unwrap_err();
    assert_eq!(
        err,
        FactoryError::MissingField {
            field: "base_salary",
            tag: "salesperson".to_string()
        }
    );
}

#[test]
fn salary_rules_per_role() {
    let senior = decode_employee(&json!({
        "type": "developer", "id": 1, "name": "D", "department": "IT",
        "base_salary": 5000, "seniority": "senior", "tech_stack": ["Rust"]
    }))
    .unwrap();
    assert_eq!(senior.calculate_salary(), 10000.0);

    let middle = decode_employee(&json!({
        "type": "developer", "id": 2, "name": "M", "department": "IT",
        "base_salary": 4000, "seniority": "MIDDLE"
    }))
    .unwrap();
    assert_eq!(middle.calculate_salary(), 6000.0);

    let seller = decode_employee(&json!({
        "type": "salesperson", "id": 3, "name": "S", "department": "Sales",
        "base_salary": 4000, "commission": 0.1, "sales_volume": 50000
    }))
    .unwrap();
    assert_eq!(seller.calculate_salary(), 9000.0);

    let plain = decode_employee(&json!({
        "type": "employee", "id": 4, "name": "E", "department": "Ops", "base_salary": 2500.5
    }))
    .unwrap();
    assert_eq!(plain.calculate_salary(), 2500.5);
}

#[test]
fn invalid_values_are_rejected() {
    let bad_seniority = decode_employee(&json!({
        "type": "developer", "id": 1, "name": "D", "department": "IT",
        "base_salary": 1, "seniority": "principal"
    }))
    .unwrap_err();
    assert!(matches!(
        bad_seniority,
        FactoryError::Validation(ValidationError::UnknownChoice { .. })
    ));

    let negative_salary = decode_employee(&json!({
        "type": "employee", "id": 1, "name": "E", "department": "D", "base_salary": -1
    }))
    .unwrap_err();
    assert!(matches!(
        negative_salary,
        FactoryError::Validation(ValidationError::InvalidAmount { .. })
    ));

    let zero_id = decode_employee(&json!({
        "type": "employee", "id": 0, "name": "E", "department": "D", "base_salary": 1
    }))
    .unwrap_err();
    assert!(matches!(
        zero_id,
        FactoryError::Validation(ValidationError::NonPositiveId { .. })
    ));

    let big_commission = decode_employee(&json!({
        "type": "salesperson", "id": 1, "name": "S", "department": "D",
        "base_salary": 1, "commission": 1.5
    }))
    .unwrap_err();
    assert!(matches!(
        big_commission,
        FactoryError::Validation(ValidationError::OutOfRange { .. })
    ));
}

#[test]
fn encoded_developer_decodes_to_same_role() {
    let original = decode_employee(&json!({
        "type": "developer", "id": 7, "name": "Dev", "department": "IT",
        "base_salary": 3000, "seniority": "middle", "tech_stack": ["Rust", "SQL"]
    }))
    .unwrap();

    let decoded = decode_employee(&serde_json::Value::Object(encode_employee(&original))).unwrap();
    assert_eq!(decoded.id(), 7);
    assert_eq!(decoded.name(), "Dev");
    assert_eq!(decoded.calculate_salary(), original.calculate_salary());
    match decoded.role() {
        Role::Developer { seniority, skills } => {
            assert_eq!(*seniority, Seniority::Middle);
            assert_eq!(skills.as_slice(), &["Rust".to_string(), "SQL".to_string()]);
        }
        other => panic!("unexpected role {other:?}"),
    }
}
