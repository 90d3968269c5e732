//! Boundary parsing for estimator inputs
//!
//! The estimator assumes well-formed numbers; anything that cannot be
//! converted is rejected here with [`AppError::InputFormat`].

use serde_json::Value;

use crate::error::AppError;

/// Parse a confidence value given as text
pub fn parse_confidence(raw: &str) -> Result<f64, AppError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        AppError::InputFormat(format!("Confidence '{}' is not a number", raw))
    })?;

    if !value.is_finite() {
        return Err(AppError::InputFormat(format!(
            "Confidence '{}' is not a finite number",
            raw
        )));
    }

    Ok(value)
}

/// Parse a confidence value from JSON, accepting numbers and numeric strings
pub fn parse_confidence_value(value: &Value) -> Result<f64, AppError> {
    match value {
        Value::Number(number) => number.as_f64().ok_or_else(|| {
            AppError::InputFormat(format!("Confidence {} is not representable", number))
        }),
        Value::String(text) => parse_confidence(text),
        other => Err(AppError::InputFormat(format!(
            "Confidence must be a number, got {}",
            other
        ))),
    }
}
