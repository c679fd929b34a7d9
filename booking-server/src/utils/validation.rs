//! Input validation helpers
//!
//! Path ids and counts must be positive integers; failures surface as 422
//! validation errors with a `location[param]`-style message list.

use shared::AppError;

/// Parse a path segment as a positive integer id
pub fn parse_positive_id(value: &str, field: &str) -> Result<i64, AppError> {
    match value.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(AppError::validation(format!(
            "params[{field}]: must be a positive integer"
        ))),
    }
}

/// Validate that a body field holds a positive integer
pub fn validate_positive(value: i64, field: &str) -> Result<(), AppError> {
    if value < 1 {
        return Err(AppError::validation(format!(
            "body[{field}]: must be a positive integer"
        )));
    }
    Ok(())
}
