use serde_json::Value;

use crate::error::{AppError, AppResult};

pub const MAX_CODE_LEN: usize = 32;
pub const MAX_EMAIL_LEN: usize = 64;

/// Presence check shared by every handler.
pub fn require<'a>(body: &'a Value, field: &str) -> AppResult<&'a Value> {
    body.get(field)
        .ok_or_else(|| AppError::Validation("Fields must not be empty".to_string()))
}

/// A JSON integer >= 0. Floats and out-of-range numbers are rejected.
pub fn non_negative_int(value: &Value, message: &str) -> AppResult<i64> {
    value
        .as_i64()
        .filter(|v| *v >= 0)
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

/// A string of at most `MAX_EMAIL_LEN` chars shaped like `x@y.z`.
pub fn email(value: &Value, message: &str) -> AppResult<String> {
    value
        .as_str()
        .filter(|s| s.len() <= MAX_EMAIL_LEN && email_shape_ok(s))
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

/// A string of at most `MAX_CODE_LEN` chars.
pub fn code_value(value: &Value, message: &str) -> AppResult<String> {
    value
        .as_str()
        .filter(|s| s.len() <= MAX_CODE_LEN)
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

fn email_shape_ok(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rfind('.') {
        Some(i) => i > 0 && i + 1 < domain.len(),
        None => false,
    }
}
