// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use time::format_description;
use time::PrimitiveDateTime;

use super::ScalarError;

/// Parse a date-time literal against an explicit `time` format pattern,
/// e.g. `"[year]-[month]-[day]T[hour]:[minute]:[second]"`.
///
/// A non-empty token that does not match the pattern is an error; this
/// never silently degrades to "no value".
pub fn parse_datetime(token: &str, pattern: &str) -> Result<PrimitiveDateTime, ScalarError> {
    let format = format_description::parse(pattern)
        .map_err(|_| ScalarError::BadPattern(pattern.to_string()))?;
    PrimitiveDateTime::parse(token.trim(), &format).map_err(|_| ScalarError::DateTimeMismatch {
        token: token.trim().to_string(),
        pattern: pattern.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    const ISO: &str = "[year]-[month]-[day]T[hour]:[minute]:[second]";
    const US: &str = "[month]/[day]/[year] [hour]:[minute]:[second]";

    #[test]
    fn parses_iso_like_timestamps() {
        let dt = parse_datetime("2024-01-15T10:30:00", ISO).unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), Month::January);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn parses_slash_separated_timestamps() {
        let dt = parse_datetime("09/17/2024 08:00:05", US).unwrap();
        assert_eq!(dt.month(), Month::September);
        assert_eq!(dt.second(), 5);
    }

    #[test]
    fn mismatch_is_an_error_not_a_none() {
        let err = parse_datetime("yesterday", ISO).unwrap_err();
        assert_eq!(
            err,
            ScalarError::DateTimeMismatch {
                token: "yesterday".to_string(),
                pattern: ISO.to_string(),
            }
        );
    }

    #[test]
    fn broken_pattern_is_reported_as_such() {
        let err = parse_datetime("2024-01-15", "[yea").unwrap_err();
        assert_eq!(err, ScalarError::BadPattern("[yea".to_string()));
    }
}
