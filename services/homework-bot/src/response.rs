//! Shape checks for the homework API response

use serde_json::Value;

use crate::error::ErrorKind;
use crate::BotError;

/// Validate the API response and return its homework records, newest first
pub fn check_response(response: &Value) -> crate::Result<&[Value]> {
    let object = response.as_object().ok_or_else(|| {
        BotError::contract(ErrorKind::TypeMismatch, "API response must be an object")
    })?;

    let homeworks = object.get("homeworks").ok_or_else(|| {
        BotError::contract(ErrorKind::MissingKey, "key 'homeworks' is missing")
    })?;

    let homeworks = homeworks.as_array().ok_or_else(|| {
        BotError::contract(ErrorKind::TypeMismatch, "key 'homeworks' must hold a list")
    })?;

    if homeworks.is_empty() {
        tracing::debug!("No new homework statuses");
    }

    Ok(homeworks)
}

/// Server timestamp to use as the next `from_date`, if the response carries one
pub fn current_date(response: &Value) -> Option<i64> {
    let value = response.get("current_date")?;
    let date = value.as_i64();
    if date.is_none() {
        tracing::debug!("Ignoring non-integer current_date: {}", value);
    }
    date
}
