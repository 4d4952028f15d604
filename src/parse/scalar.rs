// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use super::{is_sentinel, ScalarError};

/// Parse an integer field. The sentinel token (`"-"`, empty, blank) maps
/// to `Ok(None)`; anything else that is not an integer is an error.
pub fn parse_i64(token: &str) -> Result<Option<i64>, ScalarError> {
    if is_sentinel(token) {
        return Ok(None);
    }
    token
        .trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ScalarError::NotANumber(token.trim().to_string()))
}

/// Parse a floating-point field with the same sentinel rule as
/// [`parse_i64`].
pub fn parse_f64(token: &str) -> Result<Option<f64>, ScalarError> {
    if is_sentinel(token) {
        return Ok(None);
    }
    let trimmed = token.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ScalarError::NotANumber(trimmed.to_string())),
    }
}

/// Whether a token is a plain finite number. Used to tell numeric
/// overrides apart from symbolic keywords (e.g. an allocation rule that is
/// either `$pe_slots` or a literal slot count).
pub fn is_number(token: &str) -> bool {
    let trimmed = token.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
        && trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Truncate toward zero at `precision` decimal digits. `precision = 0`
/// drops all fractional digits: `truncate(1.55555, 0) == 1.0`, never a
/// rounded 2.0.
pub fn truncate(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).trunc() / scale
}
