// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use super::{is_sentinel, ScalarError};

fn split_unit(token: &str) -> (&str, &str) {
    let trimmed = token.trim();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    trimmed.split_at(end)
}

/// Parse a human-readable size like `3.6G` into bytes. The magnitude
/// letters are decimal (`K` = 10^3, `M` = 10^6, `G` = 10^9); no letter
/// means plain bytes. Sentinel tokens map to `Ok(None)`.
pub fn parse_human_size(token: &str) -> Result<Option<u64>, ScalarError> {
    if is_sentinel(token) {
        return Ok(None);
    }
    let (number, unit) = split_unit(token);
    if number.is_empty() {
        return Err(ScalarError::MissingNumber(token.trim().to_string()));
    }
    let value: f64 = number
        .parse()
        .map_err(|_| ScalarError::NotANumber(token.trim().to_string()))?;
    let scale = match unit {
        "" => 1.0,
        "K" | "k" => 1e3,
        "M" | "m" => 1e6,
        "G" | "g" => 1e9,
        _ => return Err(ScalarError::UnknownUnit(token.trim().to_string())),
    };
    Ok(Some((value * scale).round() as u64))
}

/// Convert a memory literal with an explicit byte unit (`B`, `KB`, `MB`,
/// `GB`) into gigabytes: `1.5GB -> 1.5`, `1.5MB -> 0.0015`, `1B -> 1e-9`.
///
/// Unlike [`parse_human_size`] there is no default unit and no sentinel:
/// a missing numeric prefix, a missing trailing `B`, or an unknown suffix
/// is an error.
pub fn memory_to_gbytes(token: &str) -> Result<f64, ScalarError> {
    let (number, unit) = split_unit(token);
    if number.is_empty() {
        return Err(ScalarError::MissingNumber(token.trim().to_string()));
    }
    let value: f64 = number
        .parse()
        .map_err(|_| ScalarError::NotANumber(token.trim().to_string()))?;
    // Dividing by the exact powers of ten keeps the table values
    // bit-identical to their decimal literals.
    let divisor = match unit {
        "B" => 1e9,
        "KB" => 1e6,
        "MB" => 1e3,
        "GB" => 1.0,
        _ => return Err(ScalarError::UnknownUnit(token.trim().to_string())),
    };
    Ok(value / divisor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_scale_to_bytes() {
        assert_eq!(parse_human_size("3.6G"), Ok(Some(3_600_000_000)));
        assert_eq!(parse_human_size("512"), Ok(Some(512)));
        assert_eq!(parse_human_size("1.2M"), Ok(Some(1_200_000)));
        assert_eq!(parse_human_size("100K"), Ok(Some(100_000)));
    }

    #[test]
    fn size_sentinel_is_absent() {
        assert_eq!(parse_human_size("-"), Ok(None));
        assert_eq!(parse_human_size(""), Ok(None));
    }

    #[test]
    fn size_rejects_unknown_units() {
        assert_eq!(
            parse_human_size("3.6Q"),
            Err(ScalarError::UnknownUnit("3.6Q".to_string()))
        );
        assert_eq!(
            parse_human_size("abc"),
            Err(ScalarError::MissingNumber("abc".to_string()))
        );
    }

    #[test]
    fn gbyte_conversion_table() {
        assert_eq!(memory_to_gbytes("1.5GB"), Ok(1.5));
        assert_eq!(memory_to_gbytes("1.5MB"), Ok(0.0015));
        assert_eq!(memory_to_gbytes("1.5KB"), Ok(1.5e-6));
        assert_eq!(memory_to_gbytes("1B"), Ok(1e-9));
        assert_eq!(memory_to_gbytes("1500B"), Ok(1.5e-6));
        assert_eq!(memory_to_gbytes("15000B"), Ok(1.5e-5));
    }

    #[test]
    fn gbyte_conversion_rejects_bad_tokens() {
        assert_eq!(
            memory_to_gbytes(""),
            Err(ScalarError::MissingNumber(String::new()))
        );
        // The trailing byte letter is required: bare magnitudes are not
        // valid memory literals here.
        assert_eq!(
            memory_to_gbytes("1.5K"),
            Err(ScalarError::UnknownUnit("1.5K".to_string()))
        );
        assert_eq!(
            memory_to_gbytes("2x2"),
            Err(ScalarError::UnknownUnit("2x2".to_string()))
        );
        assert_eq!(
            memory_to_gbytes("someString"),
            Err(ScalarError::MissingNumber("someString".to_string()))
        );
    }
}
