//! Scalar field validation shared by every entity constructor.
//!
//! # Responsibility
//! - Check ids, names, money amounts, ratios and enum-like choices.
//! - Produce errors that name the offending field and value.
//!
//! # Invariants
//! - Validators are pure: no I/O, no logging, no global state.
//! - A value that passes validation is returned normalized (trimmed text,
//!   widened numbers) so callers never re-normalize.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Date format used for project deadlines on disk and in user input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rejected scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Identifier is zero or negative.
    NonPositiveId { field: &'static str, value: i64 },
    /// Text is empty after trimming.
    BlankText { field: &'static str },
    /// Money-like amount is negative, NaN or infinite.
    InvalidAmount { field: &'static str, value: f64 },
    /// Value is outside an inclusive range.
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Text is not one of the allowed choices.
    UnknownChoice {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
    /// JSON value has the wrong shape for the field.
    WrongType {
        field: String,
        expected: &'static str,
    },
    /// Date text does not match `YYYY-MM-DD`.
    InvalidDate { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            Self::NonPositiveId { field, .. }
            | Self::BlankText { field }
            | Self::InvalidAmount { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::UnknownChoice { field, .. }
            | Self::InvalidDate { field, .. } => field,
            Self::WrongType { field, .. } => field.as_str(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId { field, value } => {
                write!(f, "`{field}` must be a positive integer, got {value}")
            }
            Self::BlankText { field } => write!(f, "`{field}` must not be blank"),
            Self::InvalidAmount { field, value } => write!(
                f,
                "`{field}` must be a finite non-negative number, got {value}"
            ),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "`{field}` must be within [{min}, {max}], got {value}"),
            Self::UnknownChoice {
                field,
                value,
                allowed,
            } => write!(
                f,
                "`{field}` value `{value}` is not allowed; expected one of: {}",
                allowed.join(", ")
            ),
            Self::WrongType { field, expected } => {
                write!(f, "`{field}` must be {expected}")
            }
            Self::InvalidDate { field, value } => {
                write!(f, "`{field}` value `{value}` is not a YYYY-MM-DD date")
            }
        }
    }
}

impl Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Accepts strictly positive identifiers.
pub fn validate_id(field: &'static str, value: i64) -> ValidationResult<u64> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveId { field, value });
    }
    Ok(value as u64)
}

/// Accepts non-blank text and returns it trimmed.
pub fn validate_name(field: &'static str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankText { field });
    }
    Ok(trimmed.to_string())
}

/// Department labels carried by employees may be empty, but are trimmed.
pub fn normalize_department_label(value: &str) -> String {
    value.trim().to_string()
}

/// Accepts finite amounts `>= 0`.
pub fn validate_amount(field: &'static str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidAmount { field, value });
    }
    Ok(value)
}

/// Accepts ratios inside `[0, 1]`.
pub fn validate_ratio(field: &'static str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(value)
}

/// Matches `value` against `allowed` ignoring case and surrounding whitespace.
///
/// Returns the index of the matched choice.
pub fn validate_choice(
    field: &'static str,
    value: &str,
    allowed: &'static [&'static str],
) -> ValidationResult<usize> {
    let normalized = value.trim().to_ascii_lowercase();
    allowed
        .iter()
        .position(|choice| *choice == normalized)
        .ok_or_else(|| ValidationError::UnknownChoice {
            field,
            value: value.to_string(),
            allowed,
        })
}

/// Parses a `YYYY-MM-DD` date.
pub fn validate_date(field: &'static str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{
        validate_amount, validate_choice, validate_date, validate_id, validate_name,
        validate_ratio, ValidationError,
    };

    const LEVELS: &[&str] = &["junior", "middle", "senior"];

    #[test]
    fn id_must_be_positive() {
        assert_eq!(validate_id("id", 7).unwrap(), 7);
        assert_eq!(
            validate_id("id", 0).unwrap_err(),
            ValidationError::NonPositiveId {
                field: "id",
                value: 0
            }
        );
        assert!(validate_id("id", -3).is_err());
    }

    #[test]
    fn name_is_trimmed_and_rejects_blank() {
        assert_eq!(validate_name("name", "  Alice ").unwrap(), "Alice");
        assert_eq!(
            validate_name("name", "   ").unwrap_err(),
            ValidationError::BlankText { field: "name" }
        );
    }

    #[test]
    fn amount_rejects_negative_and_non_finite() {
        assert_eq!(validate_amount("bonus", 0.0).unwrap(), 0.0);
        assert!(validate_amount("bonus", -0.01).is_err());
        assert!(validate_amount("bonus", f64::NAN).is_err());
        assert!(validate_amount("bonus", f64::INFINITY).is_err());
    }

    #[test]
    fn ratio_is_inclusive() {
        assert_eq!(validate_ratio("commission", 0.0).unwrap(), 0.0);
        assert_eq!(validate_ratio("commission", 1.0).unwrap(), 1.0);
        let err = validate_ratio("commission", 1.5).unwrap_err();
        assert!(err.to_string().contains("[0, 1]"), "unexpected: {err}");
    }

    #[test]
    fn choice_ignores_case_and_whitespace() {
        assert_eq!(validate_choice("seniority", " Senior ", LEVELS).unwrap(), 2);
        let err = validate_choice("seniority", "lead", LEVELS).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("lead"));
        assert!(message.contains("junior, middle, senior"));
    }

    #[test]
    fn date_requires_iso_format() {
        let date = validate_date("deadline", "2026-03-31").unwrap();
        assert_eq!(date.to_string(), "2026-03-31");
        assert!(validate_date("deadline", "31.03.2026").is_err());
        assert!(validate_date("deadline", "2026-02-30").is_err());
    }

    #[test]
    fn error_exposes_field_name() {
        let err = validate_name("department", "").unwrap_err();
        assert_eq!(err.field(), "department");
    }
}
