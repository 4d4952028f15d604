// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Scalar token parsers shared by both engine adapters. These know nothing
//! about entities or commands; adapters wrap their errors into classified
//! parse errors naming the originating command.

mod datetime;
mod memory;
mod scalar;

use thiserror::Error;

pub use datetime::parse_datetime;
pub use memory::{memory_to_gbytes, parse_human_size};
pub use scalar::{is_number, parse_f64, parse_i64, truncate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScalarError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' has no numeric prefix")]
    MissingNumber(String),
    #[error("'{0}' uses an unknown unit suffix")]
    UnknownUnit(String),
    #[error("'{token}' does not match pattern '{pattern}'")]
    DateTimeMismatch { token: String, pattern: String },
    #[error("invalid date-time pattern '{0}'")]
    BadPattern(String),
}

/// Backend convention for "value not reported". Distinct from zero.
pub fn is_sentinel(token: &str) -> bool {
    let trimmed = token.trim();
    trimmed.is_empty() || trimmed == "-"
}
