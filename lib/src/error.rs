#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The field `{0}` cannot be empty")]
    Empty(&'static str),
    #[error("The field `{field}` cannot be more than {max} characters long")]
    TooLong { field: &'static str, max: usize },
    #[error("RFC numbers start at 1")]
    InvalidRfcNumber,
    #[error("`{0}` is not a technology kind")]
    UnknownTechnologyKind(String),
    #[error("`{0}` is not an RFC status code")]
    UnknownStatusCode(String),
}

/// Checks that `value` is at most `max` characters long.
pub(crate) fn check_length(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(ValidationError::TooLong { field, max })
    } else {
        Ok(())
    }
}

/// Checks that `value` is non-empty and at most `max` characters long.
pub(crate) fn check_required(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }

    check_length(field, value, max)
}
