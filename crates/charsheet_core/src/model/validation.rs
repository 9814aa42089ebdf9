//! Field-level validation failures shared by the model and the form layer.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied data that cannot be accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form key was absent.
    MissingField(&'static str),
    /// `age` could not be parsed as a base-10 integer.
    InvalidAge(String),
    /// A text field exceeds its column limit.
    FieldTooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::InvalidAge(value) => {
                write!(f, "age must be a valid integer, got `{value}`")
            }
            Self::FieldTooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "field `{field}` is limited to {max_chars} characters, got {actual_chars}"
            ),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn check_len(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ValidationError> {
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(ValidationError::FieldTooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_len, ValidationError};

    #[test]
    fn check_len_counts_characters_not_bytes() {
        // 3 chars, 6 bytes
        assert!(check_len("race", "éèê", 3).is_ok());
    }

    #[test]
    fn check_len_reports_field_and_sizes() {
        let err = check_len("name", "abcd", 3).unwrap_err();
        assert_eq!(
            err,
            ValidationError::FieldTooLong {
                field: "name",
                max_chars: 3,
                actual_chars: 4
            }
        );
        assert!(err.to_string().contains("`name`"));
    }
}
