// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! sacct elapsed/CPU time literals: `[days-]hours:minutes:seconds`,
//! `minutes:seconds[.millis]`, or a bare seconds value.

use crate::parse::ScalarError;

/// Parse a sacct duration into seconds. An empty field means the row did
/// not report the value and maps to `None`.
pub(crate) fn parse_duration(token: &str) -> Result<Option<f64>, ScalarError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (days, clock) = match trimmed.split_once('-') {
        Some((days, clock)) => {
            let days: f64 = days
                .parse()
                .map_err(|_| ScalarError::NotANumber(trimmed.to_string()))?;
            (days, clock)
        }
        None => (0.0, trimmed),
    };
    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() > 3 || parts.iter().any(|part| part.is_empty()) {
        return Err(ScalarError::NotANumber(trimmed.to_string()));
    }
    let mut seconds = 0.0;
    for part in &parts {
        let value: f64 = part
            .parse()
            .map_err(|_| ScalarError::NotANumber(trimmed.to_string()))?;
        seconds = seconds * 60.0 + value;
    }
    Ok(Some(days * 86_400.0 + seconds))
}
