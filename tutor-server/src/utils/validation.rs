//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SurrealDB string fields have no built-in length enforcement,
//! so limits are applied before anything reaches a repository.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: course title, qualification name, issuer, category, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, reasons (remark, review content, cancellation reason)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, major, etc.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// File URLs / cover images
pub const MAX_URL_LEN: usize = 2048;

// ── Review rating bounds ────────────────────────────────────────────

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a review rating is inside the 1..=5 scale.
pub fn validate_rating(rating: i32) -> Result<(), AppError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}
