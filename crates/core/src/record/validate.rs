//! Field validation shared by every entity's draft and patch checks.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("start_date must not be after end_date")]
    InvertedWindow,
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("{field} does not accept {value:?}")]
    Unsupported { field: &'static str, value: String },
}

/// A required primary-language (or key) field must contain something other
/// than whitespace.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Same as [`require_text`] for patch fields, which are only checked when
/// supplied.
pub fn require_text_if_set(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => require_text(field, v),
        None => Ok(()),
    }
}

pub fn require_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if value.is_nan() || value < min || value > max {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            require_text("title_ja", ""),
            Err(ValidationError::Required { field: "title_ja" })
        );
        assert!(require_text("title_ja", "   \n").is_err());
        assert!(require_text("title_ja", "お知らせ").is_ok());
    }

    #[test]
    fn unset_patch_fields_pass() {
        assert!(require_text_if_set("title_ja", None).is_ok());
        assert!(require_text_if_set("title_ja", Some("")).is_err());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(require_range("priority", 0.0, 0.0, 1.0).is_ok());
        assert!(require_range("priority", 1.0, 0.0, 1.0).is_ok());
        assert!(require_range("priority", 1.1, 0.0, 1.0).is_err());
        assert!(require_range("priority", f64::NAN, 0.0, 1.0).is_err());
    }
}
